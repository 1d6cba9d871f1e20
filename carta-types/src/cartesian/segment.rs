use num_traits::{Float, One, Zero};

use super::traits::{CartesianPoint2d, NewCartesianPoint2d};

/// A straight line segment between two points.
#[derive(Debug, PartialEq)]
pub struct Segment<'a, Point>(pub &'a Point, pub &'a Point);

impl<'a, P: CartesianPoint2d> Segment<'a, P> {
    /// Shortest euclidean distance (squared) between a point and the segment:
    ///
    /// * if the normal from the point to the segment ends inside the segment, the returned value is the squared length
    ///   of the normal
    /// * if the normal from the point to the segment ends outside of the segment, the returned value is the smaller one
    ///   of the distances between the point and the segment's endpoints
    pub fn distance_to_point_sq<Point: CartesianPoint2d<Num = P::Num>>(
        &self,
        point: &Point,
    ) -> P::Num {
        if self.0.equal(self.1) {
            return self.0.distance_sq(point);
        }

        let ds = self.1.sub(self.0);
        let dp = point.sub(self.0);
        let ds_len = ds.x * ds.x + ds.y * ds.y;

        let r = (dp.x * ds.x + dp.y * ds.y) / ds_len;
        if r <= P::Num::zero() {
            self.0.distance_sq(point)
        } else if r >= P::Num::one() {
            self.1.distance_sq(point)
        } else {
            let s = (dp.y * ds.x - dp.x * ds.y) / ds_len;
            (s * s) * ds_len
        }
    }
}

impl<'a, P> Segment<'a, P>
where
    P: CartesianPoint2d,
    P::Num: Float,
{
    /// Point of the segment closest to the given one.
    pub fn closest_point<Out: NewCartesianPoint2d<P::Num>>(
        &self,
        point: &impl CartesianPoint2d<Num = P::Num>,
    ) -> Out {
        let ds = self.1.sub(self.0);
        let ds_len = ds.x * ds.x + ds.y * ds.y;
        if ds_len <= P::Num::zero() {
            return Out::new(self.0.x(), self.0.y());
        }

        let dp = point.sub(self.0);
        let t = (dp.x * ds.x + dp.y * ds.y) / ds_len;
        if t >= P::Num::one() {
            Out::new(self.1.x(), self.1.y())
        } else if t > P::Num::zero() {
            Out::new(self.0.x() + ds.x * t, self.0.y() + ds.y * t)
        } else {
            Out::new(self.0.x(), self.0.y())
        }
    }
}

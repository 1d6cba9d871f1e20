//! Operations on polygons in pixel coordinates.

use super::bounds::Bounds;
use super::line_util::{bit_code, edge_intersection, BOTTOM, LEFT, RIGHT, TOP};
use super::point::Point;

/// Clips the polygon ring by the rectangular bounds (Sutherland-Hodgman algorithm).
///
/// The result may contain degenerate edges along the bounds. Returns an empty vector if the
/// bounds are empty. Intersection points are rounded to integers if `round` is set.
pub fn clip_polygon(points: &[Point], bounds: &Bounds, round: bool) -> Vec<Point> {
    let (Some(min), Some(max)) = (bounds.min(), bounds.max()) else {
        return vec![];
    };

    let mut coded: Vec<(Point, u8)> = points.iter().map(|&p| (p, bit_code(p, min, max))).collect();

    for edge in [LEFT, BOTTOM, RIGHT, TOP] {
        let len = coded.len();
        let mut clipped = Vec::with_capacity(len);

        for i in 0..len {
            let j = if i == 0 { len - 1 } else { i - 1 };
            let (a, a_code) = coded[i];
            let (b, b_code) = coded[j];

            if a_code & edge == 0 {
                if b_code & edge != 0 {
                    let p = edge_intersection(b, a, edge, min, max, round);
                    clipped.push((p, bit_code(p, min, max)));
                }
                clipped.push((a, a_code));
            } else if b_code & edge == 0 {
                let p = edge_intersection(b, a, edge, min, max, round);
                clipped.push((p, bit_code(p, min, max)));
            }
        }

        coded = clipped;
    }

    coded.into_iter().map(|(p, _)| p).collect()
}

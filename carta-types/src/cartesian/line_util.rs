//! Operations on polylines in pixel coordinates.

use super::bounds::Bounds;
use super::point::Point;
use super::segment::Segment;
use crate::nested::Nested;

/// Reduces the number of points in a polyline keeping its shape within `tolerance` pixels.
///
/// First drops points closer than `tolerance` to the previously kept one, then runs the
/// Douglas-Peucker algorithm on the rest. A zero tolerance returns the points unchanged.
pub fn simplify(points: &[Point], tolerance: f64) -> Vec<Point> {
    if tolerance <= 0.0 || points.is_empty() {
        return points.to_vec();
    }

    let sq_tolerance = tolerance * tolerance;
    let reduced = reduce_points(points, sq_tolerance);
    simplify_dp(&reduced, sq_tolerance)
}

/// Distance between a point and a segment.
pub fn point_to_segment_distance(p: Point, p1: Point, p2: Point) -> f64 {
    Segment(&p1, &p2).distance_to_point_sq(&p).sqrt()
}

/// Point of the segment `p1`-`p2` closest to `p`.
pub fn closest_point_on_segment(p: Point, p1: Point, p2: Point) -> Point {
    Segment(&p1, &p2).closest_point(&p)
}

/// Returns true if the coordinates are a single sequence rather than a list of sequences.
pub fn is_flat<T>(lat_lngs: &Nested<T>) -> bool {
    lat_lngs.is_flat()
}

fn reduce_points(points: &[Point], sq_tolerance: f64) -> Vec<Point> {
    let Some((&first, rest)) = points.split_first() else {
        return vec![];
    };

    let mut reduced = vec![first];
    let mut prev = first;
    let mut prev_index = 0;
    for (i, &p) in rest.iter().enumerate() {
        if sq_distance(p, prev) > sq_tolerance {
            reduced.push(p);
            prev = p;
            prev_index = i + 1;
        }
    }

    if prev_index < points.len() - 1 {
        reduced.push(points[points.len() - 1]);
    }

    reduced
}

fn simplify_dp(points: &[Point], sq_tolerance: f64) -> Vec<Point> {
    let len = points.len();
    if len < 3 {
        return points.to_vec();
    }

    let mut markers = vec![false; len];
    markers[0] = true;
    markers[len - 1] = true;

    simplify_dp_step(points, &mut markers, sq_tolerance, 0, len - 1);

    points
        .iter()
        .zip(markers)
        .filter_map(|(p, keep)| keep.then_some(*p))
        .collect()
}

fn simplify_dp_step(
    points: &[Point],
    markers: &mut [bool],
    sq_tolerance: f64,
    first: usize,
    last: usize,
) {
    let mut max_sq_dist = 0.0;
    let mut index = 0;

    for i in first + 1..last {
        let sq_dist = Segment(&points[first], &points[last]).distance_to_point_sq(&points[i]);
        if sq_dist > max_sq_dist {
            index = i;
            max_sq_dist = sq_dist;
        }
    }

    if max_sq_dist > sq_tolerance {
        markers[index] = true;
        simplify_dp_step(points, markers, sq_tolerance, first, index);
        simplify_dp_step(points, markers, sq_tolerance, index, last);
    }
}

fn sq_distance(a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    dx * dx + dy * dy
}

pub(crate) const LEFT: u8 = 1;
pub(crate) const RIGHT: u8 = 2;
pub(crate) const BOTTOM: u8 = 4;
pub(crate) const TOP: u8 = 8;

/// Clips the segment `a`-`b` by the rectangular bounds (Cohen-Sutherland algorithm).
///
/// Returns `None` if the segment lies completely outside of the bounds or the bounds are empty.
/// Intersection points are rounded to integers if `round` is set.
pub fn clip_segment(a: Point, b: Point, bounds: &Bounds, round: bool) -> Option<(Point, Point)> {
    let (min, max) = (bounds.min()?, bounds.max()?);

    let mut a = a;
    let mut b = b;
    let mut code_a = bit_code(a, min, max);
    let mut code_b = bit_code(b, min, max);

    loop {
        if code_a | code_b == 0 {
            return Some((a, b));
        }

        if code_a & code_b != 0 {
            return None;
        }

        let code_out = if code_a != 0 { code_a } else { code_b };
        let p = edge_intersection(a, b, code_out, min, max, round);
        let new_code = bit_code(p, min, max);

        if code_out == code_a {
            a = p;
            code_a = new_code;
        } else {
            b = p;
            code_b = new_code;
        }
    }
}

pub(crate) fn edge_intersection(
    a: Point,
    b: Point,
    code: u8,
    min: Point,
    max: Point,
    round: bool,
) -> Point {
    let dx = b.x - a.x;
    let dy = b.y - a.y;

    let (x, y) = if code & TOP != 0 {
        (a.x + dx * (max.y - a.y) / dy, max.y)
    } else if code & BOTTOM != 0 {
        (a.x + dx * (min.y - a.y) / dy, min.y)
    } else if code & RIGHT != 0 {
        (max.x, a.y + dy * (max.x - a.x) / dx)
    } else {
        (min.x, a.y + dy * (min.x - a.x) / dx)
    };

    if round {
        Point::new_rounded(x, y)
    } else {
        Point::new(x, y)
    }
}

pub(crate) fn bit_code(p: Point, min: Point, max: Point) -> u8 {
    let mut code = 0;

    if p.x < min.x {
        code |= LEFT;
    } else if p.x > max.x {
        code |= RIGHT;
    }

    if p.y < min.y {
        code |= BOTTOM;
    } else if p.y > max.y {
        code |= TOP;
    }

    code
}

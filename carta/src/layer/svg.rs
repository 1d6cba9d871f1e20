//! Helpers of the SVG renderer.

use std::fmt::Write;

use carta_types::cartesian::Point;

/// Path used when there is nothing to draw, since SVG rejects an empty path.
pub const EMPTY_PATH: &str = "M0 0";

/// Builds the `d` attribute of an SVG path from rings of pixel points.
///
/// Every ring starts with a move command. Rings are closed with `z` if `closed` is set.
///
/// ```
/// use carta::layer::svg::points_to_path;
/// use carta::carta_types::cartesian::Point;
///
/// let ring = vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 5.5)];
/// assert_eq!(points_to_path(&[ring], true), "M0 0L10 0L10 5.5z");
/// ```
pub fn points_to_path(rings: &[Vec<Point>], closed: bool) -> String {
    let mut path = String::new();
    for ring in rings {
        for (i, p) in ring.iter().enumerate() {
            let command = if i == 0 { 'M' } else { 'L' };
            // Writing into a String never fails.
            let _ = write!(path, "{command}{} {}", p.x, p.y);
        }
        if closed {
            path.push('z');
        }
    }

    if path.is_empty() {
        EMPTY_PATH.to_string()
    } else {
        path
    }
}

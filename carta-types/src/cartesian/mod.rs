//! Types and functions on geometries in pixel (cartesian) coordinates.

mod bounds;
mod point;
mod segment;
mod traits;
mod transformation;

pub mod line_util;
pub mod poly_util;

pub use bounds::{bounds, Bounds, BoundsExpression, BoundsInput, BoundsLiteral, BoundsOrPoint};
pub use point::{point, Coords, Point, PointExpression};
pub use segment::Segment;
pub use traits::{CartesianPoint2d, CartesianPoint2dFloat, NewCartesianPoint2d};
pub use transformation::Transformation;

use serde::{Deserialize, Serialize};

use crate::error::CartaTypesError;

/// Single GeoJSON position: longitude (`x`), latitude (`y`) and optional altitude (`z`).
///
/// Serialized as a flat `[x, y]` or `[x, y, z]` array. Arrays of any other length are rejected
/// when deserializing.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct Position {
    /// Longitude or easting.
    pub x: f64,
    /// Latitude or northing.
    pub y: f64,
    /// Altitude.
    pub z: Option<f64>,
}

impl Position {
    /// Creates a 2d position.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: None }
    }

    /// Creates a 3d position.
    pub fn with_z(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z: Some(z) }
    }

    /// Number of components of the position (2 or 3).
    pub fn dimensions(&self) -> usize {
        if self.z.is_some() {
            3
        } else {
            2
        }
    }

    /// Components as a vector, in serialization order.
    pub fn to_vec(&self) -> Vec<f64> {
        match self.z {
            Some(z) => vec![self.x, self.y, z],
            None => vec![self.x, self.y],
        }
    }
}

impl From<[f64; 2]> for Position {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<[f64; 3]> for Position {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::with_z(x, y, z)
    }
}

impl TryFrom<&[f64]> for Position {
    type Error = CartaTypesError;

    fn try_from(value: &[f64]) -> Result<Self, Self::Error> {
        match *value {
            [x, y] => Ok(Self::new(x, y)),
            [x, y, z] => Ok(Self::with_z(x, y, z)),
            _ => Err(CartaTypesError::Conversion(format!(
                "position must contain 2 or 3 numbers, got {}",
                value.len()
            ))),
        }
    }
}

impl TryFrom<Vec<f64>> for Position {
    type Error = CartaTypesError;

    fn try_from(value: Vec<f64>) -> Result<Self, Self::Error> {
        Self::try_from(value.as_slice())
    }
}

impl From<Position> for Vec<f64> {
    fn from(value: Position) -> Self {
        value.to_vec()
    }
}

/// Bounding box of a GeoJSON object: `[west, south, east, north]` or
/// `[west, south, min_alt, east, north, max_alt]`.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub enum BBox {
    /// Two dimensional box.
    TwoD([f64; 4]),
    /// Three dimensional box.
    ThreeD([f64; 6]),
}

impl BBox {
    /// Western edge.
    pub fn west(&self) -> f64 {
        match self {
            BBox::TwoD(v) => v[0],
            BBox::ThreeD(v) => v[0],
        }
    }

    /// Southern edge.
    pub fn south(&self) -> f64 {
        match self {
            BBox::TwoD(v) => v[1],
            BBox::ThreeD(v) => v[1],
        }
    }

    /// Eastern edge.
    pub fn east(&self) -> f64 {
        match self {
            BBox::TwoD(v) => v[2],
            BBox::ThreeD(v) => v[3],
        }
    }

    /// Northern edge.
    pub fn north(&self) -> f64 {
        match self {
            BBox::TwoD(v) => v[3],
            BBox::ThreeD(v) => v[4],
        }
    }
}

impl TryFrom<Vec<f64>> for BBox {
    type Error = CartaTypesError;

    fn try_from(value: Vec<f64>) -> Result<Self, Self::Error> {
        match *value.as_slice() {
            [a, b, c, d] => Ok(BBox::TwoD([a, b, c, d])),
            [a, b, c, d, e, f] => Ok(BBox::ThreeD([a, b, c, d, e, f])),
            _ => Err(CartaTypesError::Conversion(format!(
                "bbox must contain 4 or 6 numbers, got {}",
                value.len()
            ))),
        }
    }
}

impl From<BBox> for Vec<f64> {
    fn from(value: BBox) -> Self {
        match value {
            BBox::TwoD(v) => v.to_vec(),
            BBox::ThreeD(v) => v.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_accepts_pairs_and_triples_only() {
        let p: Position = serde_json::from_str("[30.5, 50.4]").unwrap();
        assert_eq!(p, Position::new(30.5, 50.4));

        let p: Position = serde_json::from_str("[30.5, 50.4, 120]").unwrap();
        assert_eq!(p.z, Some(120.0));
        assert_eq!(p.dimensions(), 3);

        assert!(serde_json::from_str::<Position>("[30.5]").is_err());
        assert!(serde_json::from_str::<Position>("[1, 2, 3, 4]").is_err());
        assert!(serde_json::from_str::<Position>("[1, \"2\"]").is_err());
    }

    #[test]
    fn position_serializes_as_flat_array() {
        assert_eq!(
            serde_json::to_string(&Position::new(1.0, 2.0)).unwrap(),
            "[1.0,2.0]"
        );
        assert_eq!(
            serde_json::to_string(&Position::with_z(1.0, 2.0, 3.0)).unwrap(),
            "[1.0,2.0,3.0]"
        );
    }

    #[test]
    fn bbox_edges() {
        let b: BBox = serde_json::from_str("[-10, -20, 10, 20]").unwrap();
        assert_eq!((b.west(), b.south(), b.east(), b.north()), (-10.0, -20.0, 10.0, 20.0));

        let b: BBox = serde_json::from_str("[-10, -20, 0, 10, 20, 100]").unwrap();
        assert_eq!((b.west(), b.south(), b.east(), b.north()), (-10.0, -20.0, 10.0, 20.0));

        assert!(serde_json::from_str::<BBox>("[1, 2, 3]").is_err());
    }
}

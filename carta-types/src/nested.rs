//! [`Nested`] coordinate sequences of polylines and polygons.

use serde::{Deserialize, Serialize};

/// Coordinate sequence nested one to three levels deep.
///
/// Polylines hold either a single line (`Flat`) or several lines (`Rings`); polygons hold rings
/// (outer shell followed by holes) or several polygons (`Multi`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Nested<T> {
    /// Single sequence.
    Flat(Vec<T>),
    /// Sequence of sequences.
    Rings(Vec<Vec<T>>),
    /// Sequence of sequences of sequences.
    Multi(Vec<Vec<Vec<T>>>),
}

impl<T> Nested<T> {
    /// Number of nesting levels (1 to 3).
    pub fn depth(&self) -> usize {
        match self {
            Nested::Flat(_) => 1,
            Nested::Rings(_) => 2,
            Nested::Multi(_) => 3,
        }
    }

    /// Returns true if the sequence is not nested.
    pub fn is_flat(&self) -> bool {
        matches!(self, Nested::Flat(_))
    }

    /// Returns true if there is no single item at any level.
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Iterates over all items regardless of the nesting.
    pub fn iter(&self) -> Box<dyn Iterator<Item = &T> + '_> {
        match self {
            Nested::Flat(v) => Box::new(v.iter()),
            Nested::Rings(v) => Box::new(v.iter().flatten()),
            Nested::Multi(v) => Box::new(v.iter().flatten().flatten()),
        }
    }

    /// Converts every item keeping the structure.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Nested<U> {
        match self {
            Nested::Flat(v) => Nested::Flat(v.into_iter().map(f).collect()),
            Nested::Rings(v) => Nested::Rings(
                v.into_iter()
                    .map(|ring| ring.into_iter().map(&mut f).collect())
                    .collect(),
            ),
            Nested::Multi(v) => Nested::Multi(
                v.into_iter()
                    .map(|rings| {
                        rings
                            .into_iter()
                            .map(|ring| ring.into_iter().map(&mut f).collect())
                            .collect()
                    })
                    .collect(),
            ),
        }
    }

    /// Fallible version of [`Nested::map`].
    pub fn try_map<U, E>(self, mut f: impl FnMut(T) -> Result<U, E>) -> Result<Nested<U>, E> {
        fn ring<T, U, E>(
            ring: Vec<T>,
            f: &mut impl FnMut(T) -> Result<U, E>,
        ) -> Result<Vec<U>, E> {
            ring.into_iter().map(f).collect()
        }

        Ok(match self {
            Nested::Flat(v) => Nested::Flat(ring(v, &mut f)?),
            Nested::Rings(v) => Nested::Rings(
                v.into_iter()
                    .map(|r| ring(r, &mut f))
                    .collect::<Result<_, _>>()?,
            ),
            Nested::Multi(v) => Nested::Multi(
                v.into_iter()
                    .map(|rings| {
                        rings
                            .into_iter()
                            .map(|r| ring(r, &mut f))
                            .collect::<Result<Vec<_>, _>>()
                    })
                    .collect::<Result<_, _>>()?,
            ),
        })
    }
}

impl<T> Default for Nested<T> {
    fn default() -> Self {
        Nested::Flat(vec![])
    }
}

impl<T> From<Vec<T>> for Nested<T> {
    fn from(value: Vec<T>) -> Self {
        Nested::Flat(value)
    }
}

impl<T> From<Vec<Vec<T>>> for Nested<T> {
    fn from(value: Vec<Vec<T>>) -> Self {
        Nested::Rings(value)
    }
}

impl<T> From<Vec<Vec<Vec<T>>>> for Nested<T> {
    fn from(value: Vec<Vec<Vec<T>>>) -> Self {
        Nested::Multi(value)
    }
}

//! Common behaviour of the option bags.
//!
//! Option bags are closed structs: every field is optional, and unknown fields are rejected both
//! by the compiler and when a bag is deserialized. A bag that extends another one lists the
//! inherited fields itself and converts into the parent bag with `From`.

use std::fmt::{Debug, Formatter};
use std::ops::Deref;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::CartaError;

/// Behaviour shared by all option bags.
pub trait Options: Sized + Serialize + DeserializeOwned {
    /// Reads the options from a JSON object.
    ///
    /// Fields holding runtime objects (renderers, icons, callbacks) are never read from JSON and
    /// stay unset.
    fn from_json(json: &str) -> Result<Self, CartaError> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Checks that the options are consistent.
    fn validate(&self) -> Result<(), CartaError> {
        Ok(())
    }

    /// Returns the options with every field set in `other` replaced by the value from `other`.
    fn merged(self, other: Self) -> Self;
}

/// Implements [`Options`] for a bag by listing its fields.
///
/// Fields listed in `required` are not optional; the value from `other` always wins for them.
macro_rules! impl_options {
    ($name:ident { required: [$($req:ident),*], $($field:ident),* $(,)? } $(validate = $validate:path)?) => {
        impl $crate::options::Options for $name {
            fn merged(self, other: Self) -> Self {
                Self {
                    $($req: other.$req,)*
                    $($field: other.$field.or(self.$field),)*
                }
            }

            $(
                fn validate(&self) -> Result<(), $crate::error::CartaError> {
                    $validate(self)
                }
            )?
        }
    };
    ($name:ident { $($field:ident),* $(,)? } $(validate = $validate:path)?) => {
        impl_options!($name { required: [], $($field),* } $(validate = $validate)?);
    };
}

/// Implements conversion of a bag into the bag it extends, by copying the listed fields.
macro_rules! impl_options_projection {
    ($child:ident => $parent:ident { $($field:ident),* $(,)? }) => {
        impl From<&$child> for $parent {
            fn from(value: &$child) -> Self {
                Self {
                    $($field: value.$field.clone(),)*
                }
            }
        }

        impl From<$child> for $parent {
            fn from(value: $child) -> Self {
                Self::from(&value)
            }
        }
    };
}

pub(crate) use {impl_options, impl_options_projection};

/// A user callback stored in an option bag.
///
/// Callbacks are compared by identity and are never serialized.
pub struct Callback<F: ?Sized>(pub Arc<F>);

impl<F: ?Sized> Callback<F> {
    /// Wraps the callback.
    pub fn new(f: Arc<F>) -> Self {
        Self(f)
    }
}

impl<F: ?Sized> Clone for Callback<F> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<F: ?Sized> PartialEq for Callback<F> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<F: ?Sized> Debug for Callback<F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("Callback")
    }
}

impl<F: ?Sized> Deref for Callback<F> {
    type Target = F;

    fn deref(&self) -> &F {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default, rename_all = "camelCase", deny_unknown_fields)]
    struct BaseOptions {
        pane: Option<String>,
    }

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default, rename_all = "camelCase", deny_unknown_fields)]
    struct ChildOptions {
        pane: Option<String>,
        max_width: Option<f64>,
    }

    fn positive_width(options: &ChildOptions) -> Result<(), CartaError> {
        match options.max_width {
            Some(w) if w <= 0.0 => Err(CartaError::Configuration("maxWidth".into())),
            _ => Ok(()),
        }
    }

    impl_options!(BaseOptions { pane });
    impl_options!(ChildOptions { pane, max_width } validate = positive_width);
    impl_options_projection!(ChildOptions => BaseOptions { pane });

    #[test]
    fn merge_overrides_set_fields() {
        let base = ChildOptions {
            pane: Some("overlayPane".into()),
            max_width: Some(300.0),
        };
        let merged = base.merged(ChildOptions {
            max_width: Some(100.0),
            ..Default::default()
        });
        assert_eq!(merged.pane.as_deref(), Some("overlayPane"));
        assert_eq!(merged.max_width, Some(100.0));
    }

    #[test]
    fn reads_json() {
        let options = ChildOptions::from_json(r#"{"maxWidth": 50}"#).unwrap();
        assert_eq!(options.max_width, Some(50.0));
        assert_eq!(ChildOptions::from_json("{}").unwrap(), ChildOptions::default());

        assert_matches!(
            ChildOptions::from_json(r#"{"minWidth": 50}"#),
            Err(CartaError::Json(_))
        );
        assert_matches!(
            ChildOptions::from_json(r#"{"maxWidth": -1}"#),
            Err(CartaError::Configuration(_))
        );
    }

    #[test]
    fn projects_to_parent() {
        let child = ChildOptions {
            pane: Some("markerPane".into()),
            max_width: None,
        };
        assert_eq!(BaseOptions::from(&child).pane.as_deref(), Some("markerPane"));
    }
}

//! Generic helpers shared by the runtime and the option types.
//!
//! The object mechanics of a dynamic language (`extend`, `create`, `bind`, `setOptions`) have no
//! counterpart here: option bags are merged with [`Options::merged`](crate::options::Options::merged)
//! and everything else is covered by the type system.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use std::sync::atomic::{AtomicU64, Ordering};

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde_json::Value;

pub use carta_types::num::{format_num, wrap_num, DEFAULT_DIGITS};

use crate::error::CartaError;
use crate::event::ObjectId;

/// Data URL of a transparent 1x1 gif. Used to reset images of tiles that are being unloaded.
pub const EMPTY_IMAGE_URL: &str = "data:image/gif;base64,R0lGODlhAQABAAD/ACwAAAAAAQABAAACADs=";

static LAST_ID: AtomicU64 = AtomicU64::new(0);

lazy_static! {
    static ref TEMPLATE_KEY: Regex = Regex::new(r"\{ *([\w_-]+) *\}").expect("valid regex");
    static ref WHITESPACE: Regex = Regex::new(r"\s+").expect("valid regex");
}

/// Returns a new unique id. Objects of the runtime are stamped with the id once, on creation, so
/// the same object always reports the same [`ObjectId`].
pub fn stamp() -> ObjectId {
    ObjectId(LAST_ID.fetch_add(1, Ordering::Relaxed) + 1)
}

/// The id given out by the latest [`stamp`] call, `0` if none was.
pub fn last_id() -> u64 {
    LAST_ID.load(Ordering::Relaxed)
}

/// Removes leading and trailing whitespace.
pub fn trim(s: &str) -> &str {
    s.trim()
}

/// Splits the string by whitespace, ignoring leading and trailing whitespace.
///
/// An empty (or whitespace only) string gives one empty word, the same way splitting an empty
/// string by a separator does.
pub fn split_words(s: &str) -> Vec<&str> {
    WHITESPACE.split(trim(s)).collect()
}

/// Source of values for [`template`].
pub trait TemplateData {
    /// Value for the key, `None` if the key is unknown.
    fn value(&self, key: &str) -> Option<String>;
}

impl<S: BuildHasher> TemplateData for HashMap<String, String, S> {
    fn value(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl TemplateData for BTreeMap<String, String> {
    fn value(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl TemplateData for serde_json::Map<String, Value> {
    fn value(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

impl<T: TemplateData + ?Sized> TemplateData for &T {
    fn value(&self, key: &str) -> Option<String> {
        (**self).value(key)
    }
}

/// Substitutes every `{key}` of the string with the value for the key.
///
/// Whitespace inside the braces is ignored, so `{ x }` reads the same key as `{x}`. Returns an
/// error naming the placeholder if the data has no value for a key.
///
/// ```
/// use std::collections::HashMap;
/// use carta::util::template;
///
/// let data = HashMap::from([("a".to_string(), "foo".to_string())]);
/// assert_eq!(template("Hello {a}, { a }!", &data).unwrap(), "Hello foo, foo!");
/// assert!(template("Hello {b}", &data).is_err());
/// ```
pub fn template(s: &str, data: impl TemplateData) -> Result<String, CartaError> {
    let mut missing = None;
    let result = TEMPLATE_KEY.replace_all(s, |caps: &Captures| {
        match data.value(&caps[1]) {
            Some(value) => value,
            None => {
                missing.get_or_insert_with(|| caps[0].to_string());
                String::new()
            }
        }
    });

    match missing {
        Some(placeholder) => Err(CartaError::Template(format!(
            "No value provided for variable {placeholder}"
        ))),
        None => Ok(result.into_owned()),
    }
}

/// Builds a query string from the parameters.
///
/// The string starts with `?` unless `existing_url` already contains one, in which case it starts
/// with `&`, so the result can be appended to the url directly. Keys are uppercased if `uppercase`
/// is set. Keys and values are percent-encoded.
pub fn get_param_string<'a>(
    params: impl IntoIterator<Item = (&'a str, String)>,
    existing_url: Option<&str>,
    uppercase: bool,
) -> String {
    let params: Vec<String> = params
        .into_iter()
        .map(|(key, value)| {
            let key = if uppercase {
                key.to_uppercase()
            } else {
                key.to_string()
            };
            format!("{}={}", encode_uri_component(&key), encode_uri_component(&value))
        })
        .collect();

    let separator = match existing_url {
        Some(url) if url.contains('?') => '&',
        _ => '?',
    };

    format!("{separator}{}", params.join("&"))
}

/// Percent-encodes everything except the unreserved characters of a URI component.
pub fn encode_uri_component(s: &str) -> String {
    let mut encoded = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => encoded.push(byte as char),
            _ => encoded.push_str(&format!("%{byte:02X}")),
        }
    }

    encoded
}

/// Position of the first element equal to `el`.
pub fn index_of<T: PartialEq>(items: &[T], el: &T) -> Option<usize> {
    items.iter().position(|item| item == el)
}

/// Always returns `false`. Handy as an event handler that cancels the default action.
pub fn false_fn() -> bool {
    false
}

/// Id of a pending call scheduled with [`Scheduler::request_anim_frame`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct FrameRequest(pub u64);

/// Timing helpers of the runtime event loop.
pub trait Scheduler {
    /// Schedules the callback for the next animation frame. The callback receives the frame
    /// timestamp in milliseconds. If `immediate` is set and the runtime cannot schedule frames, the
    /// callback is called right away.
    fn request_anim_frame(
        &self,
        callback: Box<dyn FnOnce(f64) + Send>,
        immediate: bool,
    ) -> FrameRequest;

    /// Cancels a callback scheduled with [`Scheduler::request_anim_frame`].
    fn cancel_anim_frame(&self, request: FrameRequest);

    /// Wraps the callback so that it is called at most once in `time_ms` milliseconds. Calls made
    /// while the wrapper is waiting are dropped, except for the last one which runs at the end of
    /// the interval.
    fn throttle(
        &self,
        callback: Box<dyn Fn() + Send + Sync>,
        time_ms: u64,
    ) -> Box<dyn Fn() + Send + Sync>;
}

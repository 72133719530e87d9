//! Keypaths and nested lookup through object values.
//!
//! A [`JsonKeypath`] is a non-empty list of object keys. Resolution walks
//! the keys one object at a time; running into a non-object or a missing key
//! yields `None`, never an error.
//!
//! # Example
//!
//! ```
//! use json_bind::{JsonKeypath, JsonValue};
//!
//! let doc = JsonValue::decode_str(r#"{"a": {"b": 5}}"#).unwrap();
//! let path = JsonKeypath::from("a") + "b";
//!
//! assert_eq!(doc.resolve(&path).as_deref(), Some(&JsonValue::from(5)));
//! assert!(doc.resolve(&JsonKeypath::from_pointer("/a/x")).is_none());
//! ```

use std::borrow::Cow;
use std::fmt;
use std::ops::Add;

use crate::error::JsonError;
use crate::value::JsonValue;

/// An ordered, non-empty sequence of object keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JsonKeypath {
    segments: Vec<String>,
}

impl JsonKeypath {
    /// Builds a keypath from its segments.
    ///
    /// # Panics
    ///
    /// Panics if `segments` is empty. Use `JsonKeypath::try_from` to get an
    /// error instead.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        assert!(!segments.is_empty(), "a keypath needs at least one segment");
        JsonKeypath { segments }
    }

    /// Parses a JSON Pointer (`/a/b`), unescaping `~1` and `~0`.
    ///
    /// # Panics
    ///
    /// Panics on the root pointer `""`, which names no key.
    pub fn from_pointer(pointer: &str) -> Self {
        let body = pointer.strip_prefix('/').unwrap_or(pointer);
        assert!(!pointer.is_empty(), "the root pointer names no key");
        JsonKeypath::new(body.split('/').map(unescape_segment))
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The last key of the path.
    pub fn last(&self) -> &str {
        &self.segments[self.segments.len() - 1]
    }

    /// All but the last key, or `None` for single-segment paths.
    pub fn parent(&self) -> Option<JsonKeypath> {
        if self.segments.len() == 1 {
            return None;
        }
        Some(JsonKeypath {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// Concatenates two paths: `a.join(b)` walks `a`, then `b`.
    pub fn join(mut self, other: impl Into<JsonKeypath>) -> JsonKeypath {
        self.segments.extend(other.into().segments);
        self
    }

    pub fn push(&mut self, segment: impl Into<String>) {
        self.segments.push(segment.into());
    }

    /// Formats the path as a JSON Pointer.
    pub fn to_pointer(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            out.push('/');
            out.push_str(&escape_segment(segment));
        }
        out
    }
}

fn unescape_segment(segment: &str) -> String {
    if !segment.contains('~') {
        return segment.to_string();
    }
    // ~1 first, so that "~01" decodes to "~1".
    segment.replace("~1", "/").replace("~0", "~")
}

fn escape_segment(segment: &str) -> Cow<'_, str> {
    if !segment.contains(['/', '~']) {
        return Cow::Borrowed(segment);
    }
    Cow::Owned(segment.replace('~', "~0").replace('/', "~1"))
}

impl fmt::Display for JsonKeypath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_pointer())
    }
}

impl From<&str> for JsonKeypath {
    fn from(segment: &str) -> Self {
        JsonKeypath {
            segments: vec![segment.to_owned()],
        }
    }
}

impl From<String> for JsonKeypath {
    fn from(segment: String) -> Self {
        JsonKeypath {
            segments: vec![segment],
        }
    }
}

impl From<&JsonKeypath> for JsonKeypath {
    fn from(path: &JsonKeypath) -> Self {
        path.clone()
    }
}

impl<const N: usize> From<[&str; N]> for JsonKeypath {
    fn from(segments: [&str; N]) -> Self {
        JsonKeypath::new(segments)
    }
}

impl TryFrom<Vec<String>> for JsonKeypath {
    type Error = JsonError;

    fn try_from(segments: Vec<String>) -> Result<Self, Self::Error> {
        if segments.is_empty() {
            return Err(JsonError::custom("a keypath needs at least one segment"));
        }
        Ok(JsonKeypath { segments })
    }
}

impl<P: Into<JsonKeypath>> Add<P> for JsonKeypath {
    type Output = JsonKeypath;

    fn add(self, rhs: P) -> JsonKeypath {
        self.join(rhs)
    }
}

// ── Resolution ────────────────────────────────────────────────────────────

/// Walks `path` through nested objects starting at `root`.
///
/// Eagerly held subtrees come back borrowed. Anything reached through a
/// lazy value is produced on the fly and comes back owned.
pub fn resolve<'a>(root: &'a JsonValue, path: &JsonKeypath) -> Option<Cow<'a, JsonValue>> {
    resolve_segments(root, path.segments())
}

fn resolve_segments<'a>(root: &'a JsonValue, segments: &[String]) -> Option<Cow<'a, JsonValue>> {
    let mut current = Cow::Borrowed(root);
    for segment in segments {
        current = match current {
            Cow::Borrowed(JsonValue::Object(map)) => Cow::Borrowed(map.get(segment)?),
            Cow::Borrowed(JsonValue::Lazy(lazy)) => take_child(lazy.force(), segment)?,
            Cow::Borrowed(_) => return None,
            Cow::Owned(value) => take_child(value.into_resolved(), segment)?,
        };
    }
    Some(current)
}

fn take_child<'a>(value: JsonValue, key: &str) -> Option<Cow<'a, JsonValue>> {
    match value {
        JsonValue::Object(mut map) => map.remove(key).map(Cow::Owned),
        _ => None,
    }
}

impl JsonValue {
    /// Resolves `path` through nested objects. See [`resolve`].
    pub fn resolve(&self, path: &JsonKeypath) -> Option<Cow<'_, JsonValue>> {
        resolve(self, path)
    }

    /// Resolves every segment of `path` but the last one, and checks that
    /// the result is an object.
    ///
    /// This is the container the last key would be looked up in.
    pub fn resolve_parent(&self, path: &JsonKeypath) -> Option<Cow<'_, JsonValue>> {
        let container = resolve_segments(self, &path.segments()[..path.len() - 1])?;
        if container.as_object().is_some() {
            Some(container)
        } else {
            None
        }
    }
}

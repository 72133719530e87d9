//! The JSON value algebraic type.
//!
//! [`JsonValue`] mirrors JSON's shapes plus one extra variant, [`JsonValue::Lazy`],
//! holding a deferred producer of a subtree. Lazy values are transparent:
//! equality, lookups and conversions force them as needed and never observe
//! the wrapper itself.
//!
//! # Example
//!
//! ```
//! use json_bind::JsonValue;
//!
//! let eager = JsonValue::from(vec![JsonValue::from(1), JsonValue::from("a")]);
//! let deferred = JsonValue::lazy(|| JsonValue::from(vec![JsonValue::from(1), JsonValue::from("a")]));
//! assert_eq!(eager, deferred);
//! ```

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::lazy::LazyValue;
use crate::number::JsonNumber;

/// Object storage. Key order carries no meaning.
pub type JsonObject = BTreeMap<String, JsonValue>;

/// A JSON document, possibly containing deferred subtrees.
#[derive(Clone)]
pub enum JsonValue {
    Array(Vec<JsonValue>),
    Object(JsonObject),
    String(String),
    Number(JsonNumber),
    Null,
    Lazy(LazyValue),
}

/// Runtime shape of a value, used to describe mismatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonKind {
    Array,
    Object,
    String,
    Number,
    Boolean,
    Null,
}

impl fmt::Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JsonKind::Array => "array",
            JsonKind::Object => "object",
            JsonKind::String => "string",
            JsonKind::Number => "number",
            JsonKind::Boolean => "boolean",
            JsonKind::Null => "null",
        };
        f.write_str(name)
    }
}

impl JsonValue {
    /// Wraps a producer into a [`JsonValue::Lazy`].
    pub fn lazy<F>(producer: F) -> Self
    where
        F: Fn() -> JsonValue + Send + Sync + 'static,
    {
        JsonValue::Lazy(LazyValue::new(producer))
    }

    /// Forces a top-level lazy chain; every other value is borrowed as is.
    pub fn resolved(&self) -> Cow<'_, JsonValue> {
        match self {
            JsonValue::Lazy(lazy) => Cow::Owned(lazy.force()),
            other => Cow::Borrowed(other),
        }
    }

    /// Owned counterpart of [`JsonValue::resolved`].
    pub fn into_resolved(self) -> JsonValue {
        match self {
            JsonValue::Lazy(lazy) => lazy.force(),
            other => other,
        }
    }

    /// Shape of the resolved value.
    pub fn kind(&self) -> JsonKind {
        match self {
            JsonValue::Array(_) => JsonKind::Array,
            JsonValue::Object(_) => JsonKind::Object,
            JsonValue::String(_) => JsonKind::String,
            JsonValue::Number(n) if n.is_bool() => JsonKind::Boolean,
            JsonValue::Number(_) => JsonKind::Number,
            JsonValue::Null => JsonKind::Null,
            JsonValue::Lazy(lazy) => lazy.force().kind(),
        }
    }

    pub fn is_null(&self) -> bool {
        match self {
            JsonValue::Null => true,
            JsonValue::Lazy(lazy) => lazy.force().is_null(),
            _ => false,
        }
    }

    pub fn as_number(&self) -> Option<JsonNumber> {
        match self {
            JsonValue::Number(n) => Some(*n),
            JsonValue::Lazy(lazy) => lazy.force().as_number(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<Cow<'_, str>> {
        match self.resolved() {
            Cow::Borrowed(JsonValue::String(s)) => Some(Cow::Borrowed(s.as_str())),
            Cow::Owned(JsonValue::String(s)) => Some(Cow::Owned(s)),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<Cow<'_, [JsonValue]>> {
        match self.resolved() {
            Cow::Borrowed(JsonValue::Array(items)) => Some(Cow::Borrowed(items.as_slice())),
            Cow::Owned(JsonValue::Array(items)) => Some(Cow::Owned(items)),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<Cow<'_, JsonObject>> {
        match self.resolved() {
            Cow::Borrowed(JsonValue::Object(map)) => Some(Cow::Borrowed(map)),
            Cow::Owned(JsonValue::Object(map)) => Some(Cow::Owned(map)),
            _ => None,
        }
    }

    /// Direct child lookup for a single object key.
    pub fn get(&self, key: &str) -> Option<Cow<'_, JsonValue>> {
        match self.as_object()? {
            Cow::Borrowed(map) => map.get(key).map(Cow::Borrowed),
            Cow::Owned(mut map) => map.remove(key).map(Cow::Owned),
        }
    }

    /// Forces every lazy subtree, recursively.
    pub fn into_forced(self) -> JsonValue {
        match self.into_resolved() {
            JsonValue::Array(items) => {
                JsonValue::Array(items.into_iter().map(JsonValue::into_forced).collect())
            }
            JsonValue::Object(map) => JsonValue::Object(
                map.into_iter()
                    .map(|(k, v)| (k, v.into_forced()))
                    .collect(),
            ),
            other => other,
        }
    }

    pub fn to_forced(&self) -> JsonValue {
        self.clone().into_forced()
    }
}

// ── Equality ──────────────────────────────────────────────────────────────

impl PartialEq for JsonValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (JsonValue::Lazy(a), _) => a.force() == *other,
            (_, JsonValue::Lazy(b)) => *self == b.force(),
            (JsonValue::Array(a), JsonValue::Array(b)) => a == b,
            (JsonValue::Object(a), JsonValue::Object(b)) => a == b,
            (JsonValue::String(a), JsonValue::String(b)) => a == b,
            (JsonValue::Number(a), JsonValue::Number(b)) => a == b,
            (JsonValue::Null, JsonValue::Null) => true,
            _ => false,
        }
    }
}

impl fmt::Debug for JsonValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonValue::Array(items) => f.debug_tuple("Array").field(items).finish(),
            JsonValue::Object(map) => f.debug_tuple("Object").field(map).finish(),
            JsonValue::String(s) => f.debug_tuple("String").field(s).finish(),
            JsonValue::Number(n) => f.debug_tuple("Number").field(n).finish(),
            JsonValue::Null => f.write_str("Null"),
            JsonValue::Lazy(lazy) => fmt::Debug::fmt(lazy, f),
        }
    }
}

// ── Builders ──────────────────────────────────────────────────────────────

impl From<Vec<JsonValue>> for JsonValue {
    fn from(items: Vec<JsonValue>) -> Self {
        JsonValue::Array(items)
    }
}

impl From<JsonObject> for JsonValue {
    fn from(map: JsonObject) -> Self {
        JsonValue::Object(map)
    }
}

impl From<HashMap<String, JsonValue>> for JsonValue {
    fn from(map: HashMap<String, JsonValue>) -> Self {
        JsonValue::Object(map.into_iter().collect())
    }
}

impl From<&str> for JsonValue {
    fn from(s: &str) -> Self {
        JsonValue::String(s.to_owned())
    }
}

impl From<String> for JsonValue {
    fn from(s: String) -> Self {
        JsonValue::String(s)
    }
}

impl From<JsonNumber> for JsonValue {
    fn from(n: JsonNumber) -> Self {
        JsonValue::Number(n)
    }
}

/// `()` is the explicit null marker.
impl From<()> for JsonValue {
    fn from(_: ()) -> Self {
        JsonValue::Null
    }
}

impl From<LazyValue> for JsonValue {
    fn from(lazy: LazyValue) -> Self {
        JsonValue::Lazy(lazy)
    }
}

macro_rules! value_from_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for JsonValue {
                fn from(n: $t) -> Self {
                    JsonValue::Number(JsonNumber::from(n))
                }
            }
        )*
    };
}

value_from_number!(bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl FromIterator<JsonValue> for JsonValue {
    fn from_iter<I: IntoIterator<Item = JsonValue>>(iter: I) -> Self {
        JsonValue::Array(iter.into_iter().collect())
    }
}

impl<K: Into<String>> FromIterator<(K, JsonValue)> for JsonValue {
    fn from_iter<I: IntoIterator<Item = (K, JsonValue)>>(iter: I) -> Self {
        JsonValue::Object(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

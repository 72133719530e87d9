//! Type-directed conversion between [`JsonValue`] and native types.
//!
//! Every target type supplies a decode function ([`FromJson`]) and an
//! encode function ([`ToJson`]). Dispatch is static: the caller picks the
//! target type, never the runtime tag of the value.
//!
//! # Example
//!
//! ```
//! use json_bind::{FromJson, JsonValue, ToJson};
//!
//! let value = true.to_json().unwrap();
//! assert_eq!(value, JsonValue::from(1));
//! assert_eq!(bool::from_json(&value).unwrap(), true);
//!
//! let numbers: Vec<u8> = JsonValue::decode_str("[1, 2, 3]").unwrap().decode().unwrap();
//! assert_eq!(numbers, vec![1, 2, 3]);
//! ```

mod collections;
mod primitives;

use crate::error::{JsonError, Result};
use crate::value::JsonValue;

/// Decoding from a [`JsonValue`].
pub trait FromJson: Sized {
    fn from_json(value: &JsonValue) -> Result<Self>;
}

/// Encoding into a [`JsonValue`].
pub trait ToJson {
    fn to_json(&self) -> Result<JsonValue>;
}

impl FromJson for JsonValue {
    fn from_json(value: &JsonValue) -> Result<Self> {
        Ok(value.resolved().into_owned())
    }
}

impl ToJson for JsonValue {
    fn to_json(&self) -> Result<JsonValue> {
        Ok(self.clone())
    }
}

impl<T: ToJson + ?Sized> ToJson for &T {
    fn to_json(&self) -> Result<JsonValue> {
        (**self).to_json()
    }
}

impl<T: ToJson + ?Sized> ToJson for Box<T> {
    fn to_json(&self) -> Result<JsonValue> {
        (**self).to_json()
    }
}

/// `null` decodes to `None`; anything else must decode as `T`.
impl<T: FromJson> FromJson for Option<T> {
    fn from_json(value: &JsonValue) -> Result<Self> {
        if value.is_null() {
            return Ok(None);
        }
        T::from_json(value).map(Some)
    }
}

impl<T: ToJson> ToJson for Option<T> {
    fn to_json(&self) -> Result<JsonValue> {
        match self {
            Some(inner) => inner.to_json(),
            None => Ok(JsonValue::Null),
        }
    }
}

impl JsonValue {
    /// Decodes the value as `T`, keeping the error.
    pub fn decode<T: FromJson>(&self) -> Result<T> {
        T::from_json(self)
    }

    /// Decodes the value as `T`, discarding the error.
    pub fn value<T: FromJson>(&self) -> Option<T> {
        T::from_json(self).ok()
    }

    /// The error decoding as `T` would produce, if any.
    pub fn error<T: FromJson>(&self) -> Option<JsonError> {
        T::from_json(self).err()
    }

    /// Encodes a native value.
    pub fn encode<T: ToJson + ?Sized>(value: &T) -> Result<JsonValue> {
        value.to_json()
    }
}

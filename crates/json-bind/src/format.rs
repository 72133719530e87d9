//! Extension point for domain-specific value converters.
//!
//! A [`JsonFormatter`] converts between a resolved [`JsonValue`] and a
//! domain type the core knows nothing about, such as a timestamp. The core
//! only hands the formatter the resolved value and accepts its result;
//! concrete formatters live in other crates.
//!
//! # Example
//!
//! ```
//! use json_bind::{JsonFormatter, JsonValue, Result};
//!
//! /// Celsius stored as tenths of a degree.
//! struct Tenths;
//!
//! impl JsonFormatter for Tenths {
//!     type Value = f64;
//!
//!     fn decode(value: &JsonValue) -> Result<f64> {
//!         Ok(value.decode::<i64>()? as f64 / 10.0)
//!     }
//!
//!     fn encode(value: &f64) -> Result<JsonValue> {
//!         Ok(JsonValue::from((value * 10.0).round() as i64))
//!     }
//! }
//!
//! let doc = JsonValue::decode_str(r#"{"temps": [215, 198]}"#).unwrap();
//! let temps = doc.format::<Tenths>().retrieve_vec("temps");
//! assert_eq!(temps, Some(vec![21.5, 19.8]));
//! ```

use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

use crate::convert::{FromJson, ToJson};
use crate::error::Result;
use crate::keypath::JsonKeypath;
use crate::value::JsonValue;

/// A pluggable converter between JSON and a domain type.
pub trait JsonFormatter {
    type Value;

    fn decode(value: &JsonValue) -> Result<Self::Value>;

    fn encode(value: &Self::Value) -> Result<JsonValue>;
}

/// A value converted through formatter `F`.
///
/// Implements [`FromJson`] and [`ToJson`], so formatted values lift over
/// `Vec` and maps and can be used as record fields.
pub struct Formatted<F: JsonFormatter>(pub F::Value);

impl<F: JsonFormatter> Formatted<F> {
    pub fn into_inner(self) -> F::Value {
        self.0
    }
}

impl<F: JsonFormatter> FromJson for Formatted<F> {
    fn from_json(value: &JsonValue) -> Result<Self> {
        F::decode(value).map(Formatted)
    }
}

impl<F: JsonFormatter> ToJson for Formatted<F> {
    fn to_json(&self) -> Result<JsonValue> {
        F::encode(&self.0)
    }
}

impl<F: JsonFormatter> fmt::Debug for Formatted<F>
where
    F::Value: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Formatted").field(&self.0).finish()
    }
}

impl<F: JsonFormatter> PartialEq for Formatted<F>
where
    F::Value: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

/// Field access on a value with formatter `F` as the element decoder.
pub struct FormatView<'a, F> {
    value: &'a JsonValue,
    _formatter: PhantomData<F>,
}

impl<'a, F: JsonFormatter> FormatView<'a, F> {
    /// Decodes the whole value.
    pub fn decode(&self) -> Result<F::Value> {
        F::decode(self.value)
    }

    pub fn retrieve(&self, path: impl Into<JsonKeypath>) -> Option<F::Value> {
        self.value
            .retrieve::<Formatted<F>>(path)
            .map(Formatted::into_inner)
    }

    /// Formats every element of the array at `path`; fail-fast.
    pub fn retrieve_vec(&self, path: impl Into<JsonKeypath>) -> Option<Vec<F::Value>> {
        let items = self.value.retrieve::<Vec<Formatted<F>>>(path)?;
        Some(items.into_iter().map(Formatted::into_inner).collect())
    }

    /// Formats every value of the object at `path`; fail-fast.
    pub fn retrieve_map(&self, path: impl Into<JsonKeypath>) -> Option<HashMap<String, F::Value>> {
        let entries = self.value.retrieve::<HashMap<String, Formatted<F>>>(path)?;
        Some(
            entries
                .into_iter()
                .map(|(key, item)| (key, item.into_inner()))
                .collect(),
        )
    }

    /// Result-returning access; a missing path is `Ok(None)`.
    pub fn decode_at(&self, path: impl Into<JsonKeypath>) -> Result<Option<F::Value>> {
        Ok(self
            .value
            .decode_at::<Formatted<F>>(path)?
            .map(Formatted::into_inner))
    }
}

impl JsonValue {
    /// Views this value through formatter `F`.
    pub fn format<F: JsonFormatter>(&self) -> FormatView<'_, F> {
        FormatView {
            value: self,
            _formatter: PhantomData,
        }
    }

    /// Encodes `value` through formatter `F`.
    pub fn encode_with<F: JsonFormatter>(value: &F::Value) -> Result<JsonValue> {
        F::encode(value)
    }
}

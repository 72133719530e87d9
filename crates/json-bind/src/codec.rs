//! Bridge between JSON text and [`JsonValue`], backed by `serde_json`.
//!
//! Every failure, whether reported by `serde_json` or caught by the codec
//! itself ([`CodecError`]), is captured as [`JsonError::Wrapped`] with a
//! context message. Malformed input never
//! yields a partially built value.

use serde_json::{Map, Number, Value};
use thiserror::Error;
use tracing::debug;

use crate::convert::{FromJson, ToJson};
use crate::error::{JsonError, Result};
use crate::number::JsonNumber;
use crate::value::JsonValue;

const DECODE_CONTEXT: &str = "error while decoding JSON bytes";
const ENCODE_CONTEXT: &str = "error while encoding JSON bytes";

/// Failures detected by the codec itself rather than by `serde_json`.
///
/// Always reported wrapped in [`JsonError::Wrapped`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodecError {
    #[error("top-level JSON value must be an object or an array")]
    FragmentNotAllowed,

    #[error("{0} cannot be written as JSON")]
    NonFiniteNumber(f64),
}

/// Text codec settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecOptions {
    /// Accept documents whose top level is a scalar (`1`, `"a"`, `null`).
    pub allow_fragments: bool,
    /// Indent encoded output.
    pub pretty: bool,
}

impl Default for CodecOptions {
    fn default() -> Self {
        CodecOptions {
            allow_fragments: true,
            pretty: false,
        }
    }
}

impl CodecOptions {
    pub fn allow_fragments(mut self, allow: bool) -> Self {
        self.allow_fragments = allow;
        self
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

/// Decodes and encodes JSON text with a fixed set of [`CodecOptions`].
///
/// # Example
///
/// ```
/// use json_bind::{CodecOptions, JsonCodec};
///
/// let strict = JsonCodec::new(CodecOptions::default().allow_fragments(false));
/// assert!(strict.decode_str("[1, 2]").is_ok());
/// assert!(strict.decode_str("12").is_err());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec {
    options: CodecOptions,
}

impl JsonCodec {
    pub fn new(options: CodecOptions) -> Self {
        JsonCodec { options }
    }

    pub fn options(&self) -> &CodecOptions {
        &self.options
    }

    pub fn decode_bytes(&self, bytes: &[u8]) -> Result<JsonValue> {
        let parsed: Value = serde_json::from_slice(bytes).map_err(|err| {
            debug!(error = %err, len = bytes.len(), "failed to parse JSON text");
            JsonError::wrap(err, DECODE_CONTEXT)
        })?;
        if !self.options.allow_fragments && !(parsed.is_object() || parsed.is_array()) {
            debug!("rejected top-level JSON fragment");
            return Err(JsonError::wrap(CodecError::FragmentNotAllowed, DECODE_CONTEXT));
        }
        Ok(JsonValue::from(parsed))
    }

    pub fn decode_str(&self, text: &str) -> Result<JsonValue> {
        self.decode_bytes(text.as_bytes())
    }

    pub fn encode_bytes(&self, value: &JsonValue) -> Result<Vec<u8>> {
        let tree = Value::try_from(value)?;
        let written = if self.options.pretty {
            serde_json::to_vec_pretty(&tree)
        } else {
            serde_json::to_vec(&tree)
        };
        written.map_err(|err| {
            debug!(error = %err, "failed to write JSON text");
            JsonError::wrap(err, ENCODE_CONTEXT)
        })
    }

    pub fn encode_string(&self, value: &JsonValue) -> Result<String> {
        let bytes = self.encode_bytes(value)?;
        String::from_utf8(bytes).map_err(|err| JsonError::wrap(err, "encoded JSON is not UTF-8"))
    }
}

impl JsonValue {
    /// Parses JSON text with default [`CodecOptions`].
    pub fn decode_bytes(bytes: &[u8]) -> Result<JsonValue> {
        JsonCodec::default().decode_bytes(bytes)
    }

    pub fn decode_str(text: &str) -> Result<JsonValue> {
        JsonCodec::default().decode_str(text)
    }

    /// Writes the value as compact JSON text, forcing lazy subtrees.
    pub fn encode_bytes(&self) -> Result<Vec<u8>> {
        JsonCodec::default().encode_bytes(self)
    }

    pub fn to_json_string(&self) -> Result<String> {
        JsonCodec::default().encode_string(self)
    }
}

/// Parses JSON text and decodes it as `T`.
pub fn from_slice<T: FromJson>(bytes: &[u8]) -> Result<T> {
    T::from_json(&JsonValue::decode_bytes(bytes)?)
}

pub fn from_str<T: FromJson>(text: &str) -> Result<T> {
    T::from_json(&JsonValue::decode_str(text)?)
}

/// Encodes `value` and writes it as compact JSON text.
pub fn to_vec<T: ToJson + ?Sized>(value: &T) -> Result<Vec<u8>> {
    value.to_json()?.encode_bytes()
}

pub fn to_string<T: ToJson + ?Sized>(value: &T) -> Result<String> {
    value.to_json()?.to_json_string()
}

// ── serde_json conversions ────────────────────────────────────────────────

impl From<Value> for JsonValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => JsonValue::Null,
            Value::Bool(b) => JsonValue::Number(JsonNumber::Bool(b)),
            Value::Number(n) => JsonValue::Number(number_from_serde(&n)),
            Value::String(s) => JsonValue::String(s),
            Value::Array(items) => {
                JsonValue::Array(items.into_iter().map(JsonValue::from).collect())
            }
            Value::Object(map) => JsonValue::Object(
                map.into_iter()
                    .map(|(k, v)| (k, JsonValue::from(v)))
                    .collect(),
            ),
        }
    }
}

fn number_from_serde(n: &Number) -> JsonNumber {
    if let Some(i) = n.as_i64() {
        JsonNumber::Int(i)
    } else if let Some(u) = n.as_u64() {
        JsonNumber::UInt(u)
    } else {
        JsonNumber::Float(n.as_f64().unwrap_or(f64::NAN))
    }
}

impl TryFrom<&JsonValue> for Value {
    type Error = JsonError;

    /// Lazy subtrees are forced. Fails with a wrapped
    /// [`CodecError::NonFiniteNumber`] on NaN and infinities.
    fn try_from(value: &JsonValue) -> Result<Self> {
        Ok(match value {
            JsonValue::Lazy(lazy) => Value::try_from(&lazy.force())?,
            JsonValue::Null => Value::Null,
            JsonValue::String(s) => Value::String(s.clone()),
            JsonValue::Number(JsonNumber::Bool(b)) => Value::Bool(*b),
            JsonValue::Number(JsonNumber::Int(i)) => Value::from(*i),
            JsonValue::Number(JsonNumber::UInt(u)) => Value::from(*u),
            JsonValue::Number(JsonNumber::Float(f)) => Number::from_f64(*f)
                .map(Value::Number)
                .ok_or_else(|| JsonError::wrap(CodecError::NonFiniteNumber(*f), ENCODE_CONTEXT))?,
            JsonValue::Array(items) => Value::Array(
                items
                    .iter()
                    .map(Value::try_from)
                    .collect::<Result<Vec<_>>>()?,
            ),
            JsonValue::Object(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| Value::try_from(v).map(|v| (k.clone(), v)))
                    .collect::<Result<Map<_, _>>>()?,
            ),
        })
    }
}

impl TryFrom<JsonValue> for Value {
    type Error = JsonError;

    fn try_from(value: JsonValue) -> Result<Self> {
        Value::try_from(&value)
    }
}

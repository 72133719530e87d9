//! Scalar conversions.
//!
//! Numbers decode with Rust's `as` casting rules: integers wrap to the
//! target width, floats truncate toward zero and saturate. Booleans are
//! numbers, so `bool` accepts 0 and 1 and integers accept `true`/`false`.

use crate::error::{JsonError, Result};
use crate::number::JsonNumber;
use crate::value::JsonValue;

use super::{FromJson, ToJson};

impl FromJson for String {
    /// Accepts strings and, for numbers, their decimal text.
    fn from_json(value: &JsonValue) -> Result<Self> {
        match &*value.resolved() {
            JsonValue::String(s) => Ok(s.clone()),
            JsonValue::Number(n) => Ok(n.to_string()),
            other => Err(JsonError::type_mismatch::<String>(other)),
        }
    }
}

impl ToJson for String {
    fn to_json(&self) -> Result<JsonValue> {
        Ok(JsonValue::String(self.clone()))
    }
}

impl ToJson for str {
    fn to_json(&self) -> Result<JsonValue> {
        Ok(JsonValue::String(self.to_owned()))
    }
}

impl FromJson for bool {
    fn from_json(value: &JsonValue) -> Result<Self> {
        value
            .as_number()
            .and_then(JsonNumber::as_bool)
            .ok_or_else(|| JsonError::type_mismatch::<bool>(value))
    }
}

impl ToJson for bool {
    fn to_json(&self) -> Result<JsonValue> {
        Ok(JsonValue::Number(JsonNumber::Bool(*self)))
    }
}

macro_rules! numeric_conversions {
    ($($t:ty),*) => {
        $(
            impl FromJson for $t {
                fn from_json(value: &JsonValue) -> Result<Self> {
                    let number = value
                        .as_number()
                        .ok_or_else(|| JsonError::type_mismatch::<$t>(value))?;
                    Ok(match number {
                        JsonNumber::Bool(b) => u8::from(b) as $t,
                        JsonNumber::Int(i) => i as $t,
                        JsonNumber::UInt(u) => u as $t,
                        JsonNumber::Float(f) => f as $t,
                    })
                }
            }

            impl ToJson for $t {
                fn to_json(&self) -> Result<JsonValue> {
                    Ok(JsonValue::Number(JsonNumber::from(*self)))
                }
            }
        )*
    };
}

numeric_conversions!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

//! The single numeric representation of [`JsonValue`](crate::JsonValue).
//!
//! Booleans live here too: `true`/`false` are the numbers 1 and 0 that
//! remember to render as boolean literals in JSON text.

use std::fmt;

/// A JSON number, or a boolean carried as a number.
#[derive(Debug, Clone, Copy)]
pub enum JsonNumber {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
}

impl JsonNumber {
    /// Returns the value as an exact integer, if it has one.
    fn as_i128(self) -> Option<i128> {
        match self {
            JsonNumber::Bool(b) => Some(i128::from(b)),
            JsonNumber::Int(i) => Some(i128::from(i)),
            JsonNumber::UInt(u) => Some(i128::from(u)),
            JsonNumber::Float(_) => None,
        }
    }

    /// Returns the value widened to `f64`.
    pub fn as_f64(self) -> f64 {
        match self {
            JsonNumber::Bool(b) => f64::from(u8::from(b)),
            JsonNumber::Int(i) => i as f64,
            JsonNumber::UInt(u) => u as f64,
            JsonNumber::Float(f) => f,
        }
    }

    /// Interprets the number as a boolean: 0 is `false`, 1 is `true`.
    ///
    /// Every other value yields `None`.
    pub fn as_bool(self) -> Option<bool> {
        match self {
            JsonNumber::Bool(b) => Some(b),
            n if n == JsonNumber::Int(0) => Some(false),
            n if n == JsonNumber::Int(1) => Some(true),
            _ => None,
        }
    }

    pub fn is_bool(self) -> bool {
        matches!(self, JsonNumber::Bool(_))
    }

    pub fn is_integer(self) -> bool {
        match self {
            JsonNumber::Float(f) => f.is_finite() && f.fract() == 0.0,
            _ => true,
        }
    }
}

impl PartialEq for JsonNumber {
    /// Numeric identity: `Bool(true)`, `Int(1)`, `UInt(1)` and `Float(1.0)`
    /// are all equal.
    fn eq(&self, other: &Self) -> bool {
        match (self.as_i128(), other.as_i128()) {
            (Some(a), Some(b)) => a == b,
            (Some(i), None) => float_equals_integer(other.as_f64(), i),
            (None, Some(i)) => float_equals_integer(self.as_f64(), i),
            (None, None) => self.as_f64() == other.as_f64(),
        }
    }
}

/// Exact comparison; no rounding of `i` to the nearest `f64`.
fn float_equals_integer(f: f64, i: i128) -> bool {
    // Every integer a JsonNumber holds lies in [-2^63, 2^64).
    const TWO_POW_64: f64 = 18_446_744_073_709_551_616.0;
    f.fract() == 0.0 && (-TWO_POW_64..TWO_POW_64).contains(&f) && f as i128 == i
}

impl fmt::Display for JsonNumber {
    /// Decimal rendering; booleans render as `1`/`0`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonNumber::Bool(b) => write!(f, "{}", u8::from(*b)),
            JsonNumber::Int(i) => write!(f, "{i}"),
            JsonNumber::UInt(u) => write!(f, "{u}"),
            JsonNumber::Float(x) => write!(f, "{x}"),
        }
    }
}

impl From<bool> for JsonNumber {
    fn from(value: bool) -> Self {
        JsonNumber::Bool(value)
    }
}

macro_rules! number_from {
    ($variant:ident, $wide:ty: $($t:ty),*) => {
        $(
            impl From<$t> for JsonNumber {
                fn from(value: $t) -> Self {
                    JsonNumber::$variant(value as $wide)
                }
            }
        )*
    };
}

number_from!(Int, i64: i8, i16, i32, i64, isize);
number_from!(UInt, u64: u8, u16, u32, u64, usize);
number_from!(Float, f64: f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_identity() {
        assert_eq!(JsonNumber::Bool(true), JsonNumber::Int(1));
        assert_eq!(JsonNumber::Bool(false), JsonNumber::UInt(0));
        assert_eq!(JsonNumber::Int(1), JsonNumber::Float(1.0));
        assert_eq!(JsonNumber::UInt(u64::MAX), JsonNumber::UInt(u64::MAX));
        assert_ne!(JsonNumber::Int(-1), JsonNumber::UInt(u64::MAX));
        assert_ne!(JsonNumber::Float(1.5), JsonNumber::Int(1));
    }

    #[test]
    fn test_integer_float_equality_is_exact() {
        let big = JsonNumber::Int(9_007_199_254_740_993);
        let rounded = JsonNumber::Float(9_007_199_254_740_992.0);
        assert_ne!(big, rounded);
        assert_ne!(rounded, big);
        assert_eq!(JsonNumber::Int(9_007_199_254_740_992), rounded);
        assert_eq!(JsonNumber::UInt(1 << 63), JsonNumber::Float(9_223_372_036_854_775_808.0));
        assert_ne!(JsonNumber::UInt(u64::MAX), JsonNumber::Float(18_446_744_073_709_551_616.0));
        assert_ne!(JsonNumber::Int(0), JsonNumber::Float(f64::NAN));
        assert_ne!(JsonNumber::Int(i64::MAX), JsonNumber::Float(f64::INFINITY));
    }

    #[test]
    fn test_nan_is_not_equal_to_itself() {
        assert_ne!(JsonNumber::Float(f64::NAN), JsonNumber::Float(f64::NAN));
    }

    #[test]
    fn test_as_bool() {
        assert_eq!(JsonNumber::Bool(true).as_bool(), Some(true));
        assert_eq!(JsonNumber::Int(0).as_bool(), Some(false));
        assert_eq!(JsonNumber::Float(1.0).as_bool(), Some(true));
        assert_eq!(JsonNumber::Int(2).as_bool(), None);
        assert_eq!(JsonNumber::Float(0.5).as_bool(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(JsonNumber::Bool(true).to_string(), "1");
        assert_eq!(JsonNumber::Int(-42).to_string(), "-42");
        assert_eq!(JsonNumber::Float(1.5).to_string(), "1.5");
        assert_eq!(JsonNumber::Float(2.0).to_string(), "2");
    }

    #[test]
    fn test_is_integer() {
        assert!(JsonNumber::Int(3).is_integer());
        assert!(JsonNumber::Float(3.0).is_integer());
        assert!(!JsonNumber::Float(3.25).is_integer());
        assert!(!JsonNumber::Float(f64::INFINITY).is_integer());
    }
}

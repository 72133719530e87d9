//! Error model shared by every conversion in the crate.

use std::error::Error as StdError;

use thiserror::Error;

use crate::value::JsonValue;

/// Boxed foreign error carried by [`JsonError::Wrapped`].
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Errors produced while decoding or encoding JSON values.
#[derive(Debug, Error)]
pub enum JsonError {
    /// The value had a different shape than the target type accepts.
    ///
    /// Holds the expected type name and a description of the actual value.
    #[error("type mismatch: expected {0}, found {1}")]
    TypeMismatch(String, String),

    /// Generic failure with a message.
    #[error("{0}")]
    Custom(String),

    /// A foreign error (usually from the text codec) with context.
    #[error("{1}: {0}")]
    Wrapped(#[source] BoxError, String),
}

impl JsonError {
    /// Builds a [`JsonError::TypeMismatch`] for target type `T` and the
    /// runtime shape of `actual`.
    pub fn type_mismatch<T: ?Sized>(actual: &JsonValue) -> Self {
        JsonError::TypeMismatch(short_type_name::<T>(), actual.kind().to_string())
    }

    pub fn custom(message: impl Into<String>) -> Self {
        JsonError::Custom(message.into())
    }

    /// Captures a foreign error together with a context message.
    pub fn wrap<E>(error: E, context: impl Into<String>) -> Self
    where
        E: Into<BoxError>,
    {
        JsonError::Wrapped(error.into(), context.into())
    }

    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, JsonError::TypeMismatch(..))
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = JsonError> = std::result::Result<T, E>;

/// Returns the type name of `T` with module paths stripped.
///
/// `alloc::vec::Vec<alloc::string::String>` becomes `Vec<String>`.
pub fn short_type_name<T: ?Sized>() -> String {
    let full = std::any::type_name::<T>();
    let mut out = String::with_capacity(full.len());
    for c in full.chars() {
        if c == ':' {
            // Drop the path segment that precedes `::`.
            while out.ends_with(|p: char| p.is_alphanumeric() || p == '_') {
                out.pop();
            }
        } else {
            out.push(c);
        }
    }
    out
}

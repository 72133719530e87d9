//! Deferred, non-memoized producers of JSON subtrees.

use std::fmt;
use std::sync::Arc;

use crate::value::JsonValue;

/// A shareable zero-argument producer of a [`JsonValue`].
///
/// Unlike a once-cell, the producer is invoked again on every access:
/// equality checks, lookups and conversions all force it anew. Producers
/// must therefore be pure, terminating, and safe to call concurrently.
///
/// # Examples
///
/// ```
/// use json_bind::{JsonValue, LazyValue};
///
/// let lazy = LazyValue::new(|| JsonValue::from(5));
/// assert_eq!(lazy.force(), JsonValue::from(5));
/// ```
#[derive(Clone)]
pub struct LazyValue(Arc<dyn Fn() -> JsonValue + Send + Sync>);

impl LazyValue {
    pub fn new<F>(producer: F) -> Self
    where
        F: Fn() -> JsonValue + Send + Sync + 'static,
    {
        LazyValue(Arc::new(producer))
    }

    /// Invokes the producer once, possibly yielding another lazy value.
    pub fn produce(&self) -> JsonValue {
        (self.0)()
    }

    /// Invokes the producer, following chains of lazy values until a
    /// non-lazy value is produced.
    ///
    /// Children of the returned value are not forced.
    pub fn force(&self) -> JsonValue {
        let mut value = self.produce();
        while let JsonValue::Lazy(next) = value {
            value = next.produce();
        }
        value
    }
}

impl fmt::Debug for LazyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Lazy").field(&self.force()).finish()
    }
}

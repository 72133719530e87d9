//! Field access and applicative record construction.
//!
//! Field accessors come in three strengths:
//!
//! - [`JsonValue::retrieve`]: `Option<T>`, absent and undecodable look the same;
//! - [`JsonValue::retrieve_opt`]: `Option<Option<T>>`, the outer level says
//!   whether the key path exists at all;
//! - [`JsonValue::decode_at`] / [`JsonValue::require`]: `Result`, keeps the
//!   concrete [`JsonError`].
//!
//! [`RecordBuilder`] combines any number of field accesses and calls a
//! constructor only when every one of them produced a value.
//!
//! # Example
//!
//! ```
//! use json_bind::JsonValue;
//!
//! #[derive(Debug, PartialEq)]
//! struct User {
//!     id: i64,
//!     name: String,
//!     email: Option<String>,
//! }
//!
//! impl User {
//!     fn new(id: i64, name: String, email: Option<String>) -> Self {
//!         User { id, name, email }
//!     }
//! }
//!
//! let doc = JsonValue::decode_str(r#"{"id": 1, "name": "a"}"#).unwrap();
//! let user = doc
//!     .record()
//!     .field::<i64>("id")
//!     .field::<String>("name")
//!     .optional::<String>("email")
//!     .build(User::new);
//!
//! assert_eq!(user, Some(User { id: 1, name: "a".into(), email: None }));
//! ```

use tracing::trace;

use crate::convert::FromJson;
use crate::error::{JsonError, Result};
use crate::keypath::JsonKeypath;
use crate::value::JsonValue;

// ── Field accessors ───────────────────────────────────────────────────────

impl JsonValue {
    /// Resolves `path` and decodes it as `T`.
    ///
    /// A missing path and a failed decode both yield `None`; use
    /// [`JsonValue::decode_at`] to see the error.
    pub fn retrieve<T: FromJson>(&self, path: impl Into<JsonKeypath>) -> Option<T> {
        let found = self.resolve(&path.into())?;
        T::from_json(&found).ok()
    }

    /// Two-level optional access.
    ///
    /// - `None`: the key path does not exist;
    /// - `Some(None)`: the key exists but holds null or a value that does
    ///   not decode as `T`;
    /// - `Some(Some(value))`: decoded.
    pub fn retrieve_opt<T: FromJson>(&self, path: impl Into<JsonKeypath>) -> Option<Option<T>> {
        let found = self.resolve(&path.into())?;
        Some(T::from_json(&found).ok())
    }

    /// Resolves `path` and decodes it as `T`, keeping decode errors.
    ///
    /// A missing path is `Ok(None)`.
    pub fn decode_at<T: FromJson>(&self, path: impl Into<JsonKeypath>) -> Result<Option<T>> {
        match self.resolve(&path.into()) {
            Some(found) => T::from_json(&found).map(Some),
            None => Ok(None),
        }
    }

    /// Like [`JsonValue::decode_at`], with a missing path reported as
    /// [`JsonError::Custom`].
    pub fn require<T: FromJson>(&self, path: impl Into<JsonKeypath>) -> Result<T> {
        let path = path.into();
        match self.resolve(&path) {
            Some(found) => T::from_json(&found),
            None if self.resolve_parent(&path).is_some() => Err(JsonError::custom(format!(
                "missing key {:?} at {}",
                path.last(),
                path
            ))),
            None => Err(JsonError::custom(format!(
                "no object to look up {:?} in at {}",
                path.last(),
                path
            ))),
        }
    }

    /// Starts a record built from fields of this value.
    pub fn record(&self) -> RecordBuilder<'_, ()> {
        RecordBuilder {
            root: Some(self),
            args: Some(()),
            error: None,
        }
    }
}

// ── Record builder ────────────────────────────────────────────────────────

/// Accumulates field values for a constructor of N arguments.
///
/// Once a field is absent the builder stops evaluating further fields and
/// the record can no longer be built; no partial record is ever produced.
#[derive(Debug)]
pub struct RecordBuilder<'a, A> {
    root: Option<&'a JsonValue>,
    args: Option<A>,
    error: Option<JsonError>,
}

impl Default for RecordBuilder<'_, ()> {
    fn default() -> Self {
        RecordBuilder::new()
    }
}

impl<'a> RecordBuilder<'a, ()> {
    /// A builder without a root value; fields are supplied with
    /// [`RecordBuilder::and`] or [`RecordBuilder::field_in`].
    pub fn new() -> Self {
        RecordBuilder {
            root: None,
            args: Some(()),
            error: None,
        }
    }
}

impl<'a, A> RecordBuilder<'a, A> {
    fn push<T>(
        self,
        item: Option<T>,
        error: impl FnOnce() -> Option<JsonError>,
    ) -> RecordBuilder<'a, A::Output>
    where
        A: Append<T>,
    {
        let RecordBuilder { root, args, error: first } = self;
        match (args, item) {
            (Some(args), Some(item)) => RecordBuilder {
                root,
                args: Some(args.append(item)),
                error: first,
            },
            (Some(_), None) => RecordBuilder {
                root,
                args: None,
                error: error(),
            },
            (None, _) => RecordBuilder {
                root,
                args: None,
                error: first,
            },
        }
    }

    fn is_aborted(&self) -> bool {
        self.args.is_none()
    }

    /// Adds a pre-computed optional field access.
    pub fn and<T>(self, field: Option<T>) -> RecordBuilder<'a, A::Output>
    where
        A: Append<T>,
    {
        self.push(field, || None)
    }

    /// Adds a required field resolved from the builder's root.
    pub fn field<T: FromJson>(self, path: impl Into<JsonKeypath>) -> RecordBuilder<'a, A::Output>
    where
        A: Append<T>,
    {
        match self.root {
            Some(root) => self.field_in(root, path),
            None => {
                let path = path.into();
                self.push::<T>(None, || {
                    Some(JsonError::custom(format!("no root value to resolve {path} in")))
                })
            }
        }
    }

    /// Adds a required field resolved from `root`.
    pub fn field_in<T: FromJson>(
        self,
        root: &JsonValue,
        path: impl Into<JsonKeypath>,
    ) -> RecordBuilder<'a, A::Output>
    where
        A: Append<T>,
    {
        if self.is_aborted() {
            return self.push::<T>(None, || None);
        }
        let path = path.into();
        match root.decode_at::<T>(&path) {
            Ok(Some(value)) => self.push(Some(value), || None),
            Ok(None) => {
                trace!(keypath = %path, "record field absent");
                self.push::<T>(None, || None)
            }
            Err(err) => {
                trace!(keypath = %path, error = %err, "record field failed to decode");
                self.push::<T>(None, || Some(err))
            }
        }
    }

    /// Adds an optional field: missing or undecodable becomes `None`, and
    /// the record can still be built.
    ///
    /// A builder without a root has nothing to look in, so the field is
    /// `None` there too.
    pub fn optional<T: FromJson>(
        self,
        path: impl Into<JsonKeypath>,
    ) -> RecordBuilder<'a, A::Output>
    where
        A: Append<Option<T>>,
    {
        if self.is_aborted() {
            return self.push::<Option<T>>(None, || None);
        }
        let field = self.root.and_then(|root| root.retrieve::<T>(path));
        self.push(Some(field), || None)
    }

    /// The collected arguments, if every field was present.
    pub fn finish(self) -> Option<A> {
        self.args
    }

    /// Calls `ctor` with the collected fields, if every field was present.
    pub fn build<R, F>(self, ctor: F) -> Option<R>
    where
        F: Construct<A, R>,
    {
        self.args.map(|args| ctor.construct(args))
    }

    /// Error-preserving [`RecordBuilder::build`].
    ///
    /// Returns the concrete decode error of the first failing field, or
    /// `Custom("could not construct <record>")` when that field was simply
    /// absent.
    pub fn try_build<R, F>(self, ctor: F, record: &str) -> Result<R>
    where
        F: Construct<A, R>,
    {
        match self.args {
            Some(args) => Ok(ctor.construct(args)),
            None => Err(self
                .error
                .unwrap_or_else(|| JsonError::custom(format!("could not construct {record}")))),
        }
    }
}

/// Appends one element to an argument tuple.
pub trait Append<T> {
    type Output;

    fn append(self, item: T) -> Self::Output;
}

/// A constructor callable with an argument tuple.
///
/// Implemented for every `FnOnce` of up to twelve arguments.
pub trait Construct<Args, R> {
    fn construct(self, args: Args) -> R;
}

macro_rules! tuple_impls {
    ($($T:ident $v:ident),*) => {
        impl<$($T,)* Item> Append<Item> for ($($T,)*) {
            type Output = ($($T,)* Item,);

            fn append(self, item: Item) -> Self::Output {
                let ($($v,)*) = self;
                ($($v,)* item,)
            }
        }

        impl<Func, Ret, $($T),*> Construct<($($T,)*), Ret> for Func
        where
            Func: FnOnce($($T),*) -> Ret,
        {
            fn construct(self, ($($v,)*): ($($T,)*)) -> Ret {
                self($($v),*)
            }
        }
    };
}

tuple_impls!();
tuple_impls!(T1 v1);
tuple_impls!(T1 v1, T2 v2);
tuple_impls!(T1 v1, T2 v2, T3 v3);
tuple_impls!(T1 v1, T2 v2, T3 v3, T4 v4);
tuple_impls!(T1 v1, T2 v2, T3 v3, T4 v4, T5 v5);
tuple_impls!(T1 v1, T2 v2, T3 v3, T4 v4, T5 v5, T6 v6);
tuple_impls!(T1 v1, T2 v2, T3 v3, T4 v4, T5 v5, T6 v6, T7 v7);
tuple_impls!(T1 v1, T2 v2, T3 v3, T4 v4, T5 v5, T6 v6, T7 v7, T8 v8);
tuple_impls!(T1 v1, T2 v2, T3 v3, T4 v4, T5 v5, T6 v6, T7 v7, T8 v8, T9 v9);
tuple_impls!(T1 v1, T2 v2, T3 v3, T4 v4, T5 v5, T6 v6, T7 v7, T8 v8, T9 v9, T10 v10);
tuple_impls!(T1 v1, T2 v2, T3 v3, T4 v4, T5 v5, T6 v6, T7 v7, T8 v8, T9 v9, T10 v10, T11 v11);

// `Construct` for twelve arguments; `Append` stops at eleven-tuples.
impl<Func, Ret, T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11, T12>
    Construct<(T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11, T12), Ret> for Func
where
    Func: FnOnce(T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11, T12) -> Ret,
{
    fn construct(
        self,
        (v1, v2, v3, v4, v5, v6, v7, v8, v9, v10, v11, v12): (
            T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11, T12,
        ),
    ) -> Ret {
        self(v1, v2, v3, v4, v5, v6, v7, v8, v9, v10, v11, v12)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    fn point(x: i32, y: i32) -> Point {
        Point { x, y }
    }

    fn doc(text: &str) -> JsonValue {
        JsonValue::decode_str(text).unwrap()
    }

    #[test]
    fn test_retrieve() {
        let value = doc(r#"{"object": {"bool": true}, "n": "x"}"#);
        assert_eq!(value.retrieve::<bool>(["object", "bool"]), Some(true));
        assert_eq!(value.retrieve::<bool>(["object", "missing"]), None);
        assert_eq!(value.retrieve::<i32>("n"), None);
    }

    #[test]
    fn test_retrieve_opt_levels() {
        let value = doc(r#"{"present": "s", "null": null, "wrong": [1]}"#);
        assert_eq!(value.retrieve_opt::<String>("present"), Some(Some("s".into())));
        assert_eq!(value.retrieve_opt::<String>("null"), Some(None));
        assert_eq!(value.retrieve_opt::<String>("wrong"), Some(None));
        assert_eq!(value.retrieve_opt::<String>("absent"), None);
        assert_eq!(value.retrieve_opt::<String>(["present", "deeper"]), None);
    }

    #[test]
    fn test_decode_at_keeps_error() {
        let value = doc(r#"{"a": {"b": "nope"}}"#);
        assert!(matches!(value.decode_at::<u8>(["a", "b"]), Err(JsonError::TypeMismatch(..))));
        assert!(matches!(value.decode_at::<u8>(["a", "c"]), Ok(None)));
    }

    #[test]
    fn test_require() {
        let value = doc(r#"{"a": {"b": 3}, "s": 1}"#);
        assert_eq!(value.require::<u8>(["a", "b"]).unwrap(), 3);
        let err = value.require::<u8>(["a", "c"]).unwrap_err();
        assert_eq!(err.to_string(), r#"missing key "c" at /a/c"#);
        let err = value.require::<u8>(["s", "c"]).unwrap_err();
        assert_eq!(err.to_string(), r#"no object to look up "c" in at /s/c"#);
    }

    #[test]
    fn test_build_all_present() {
        let value = doc(r#"{"x": 1, "y": 2}"#);
        let p = value.record().field::<i32>("x").field::<i32>("y").build(point);
        assert_eq!(p, Some(Point { x: 1, y: 2 }));
    }

    #[test]
    fn test_build_aborts_on_absent_field() {
        let value = doc(r#"{"x": 1}"#);
        assert_eq!(value.record().field::<i32>("x").field::<i32>("y").build(point), None);
    }

    #[test]
    fn test_build_aborts_on_wrong_type() {
        let value = doc(r#"{"x": 1, "y": "two"}"#);
        assert_eq!(value.record().field::<i32>("x").field::<i32>("y").build(point), None);
    }

    #[test]
    fn test_try_build_errors() {
        let value = doc(r#"{"x": 1, "y": "two"}"#);
        let err = value
            .record()
            .field::<i32>("x")
            .field::<i32>("y")
            .try_build(point, "Point")
            .unwrap_err();
        assert!(err.is_type_mismatch());

        let value = doc(r#"{"x": 1}"#);
        let err = value
            .record()
            .field::<i32>("x")
            .field::<i32>("y")
            .try_build(point, "Point")
            .unwrap_err();
        assert_eq!(err.to_string(), "could not construct Point");
    }

    #[test]
    fn test_try_build_reports_first_failure() {
        // "x" is absent, so the bad "y" is never looked at.
        let value = doc(r#"{"y": "two"}"#);
        let err = value
            .record()
            .field::<i32>("x")
            .field::<i32>("y")
            .try_build(point, "Point")
            .unwrap_err();
        assert_eq!(err.to_string(), "could not construct Point");
    }

    #[test]
    fn test_optional_field_never_aborts() {
        let value = doc(r#"{"x": 1}"#);
        let pair = value
            .record()
            .field::<i32>("x")
            .optional::<i32>("y")
            .build(|x: i32, y: Option<i32>| (x, y));
        assert_eq!(pair, Some((1, None)));
    }

    #[test]
    fn test_and_with_prebuilt_accesses() {
        let a = doc(r#"{"x": 1}"#);
        let b = doc(r#"{"y": 2}"#);
        let p = RecordBuilder::new()
            .and(a.retrieve::<i32>("x"))
            .and(b.retrieve::<i32>("y"))
            .build(point);
        assert_eq!(p, Some(Point { x: 1, y: 2 }));

        let p = RecordBuilder::new().and(a.retrieve::<i32>("x")).and(None::<i32>).build(point);
        assert_eq!(p, None);
    }

    #[test]
    fn test_and_with_double_optional() {
        let value = doc(r#"{"x": 1, "y": null}"#);
        let pair = value
            .record()
            .field::<i32>("x")
            .and(value.retrieve_opt::<i32>("y"))
            .finish();
        assert_eq!(pair, Some((1, None)));
        let missing = value.record().and(value.retrieve_opt::<i32>("z")).finish();
        assert_eq!(missing, None);
    }

    #[test]
    fn test_field_in_several_roots() {
        let a = doc(r#"{"x": 1}"#);
        let b = doc(r#"{"y": 2}"#);
        let p = RecordBuilder::new().field_in::<i32>(&a, "x").field_in::<i32>(&b, "y").build(point);
        assert_eq!(p, Some(Point { x: 1, y: 2 }));
    }

    #[test]
    fn test_field_without_root() {
        let err = RecordBuilder::new().field::<i32>("x").try_build(|x: i32| x, "X").unwrap_err();
        assert_eq!(err.to_string(), "no root value to resolve /x in");
    }

    #[test]
    fn test_optional_without_root_is_none() {
        let pair = RecordBuilder::new()
            .and(Some(1))
            .optional::<i32>("x")
            .build(|a: i32, b: Option<i32>| (a, b));
        assert_eq!(pair, Some((1, None)));

        let aborted = RecordBuilder::new()
            .and(None::<i32>)
            .optional::<i32>("x")
            .finish();
        assert_eq!(aborted, None);
    }

    #[test]
    fn test_no_fields() {
        assert_eq!(RecordBuilder::new().build(|| 7), Some(7));
    }

    #[test]
    fn test_fields_not_evaluated_after_abort() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let forced = Arc::new(AtomicUsize::new(0));
        let counter = forced.clone();
        let value: JsonValue = vec![(
            "later",
            JsonValue::lazy(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                JsonValue::from(1)
            }),
        )]
        .into_iter()
        .collect();
        let p = value.record().field::<i32>("missing").field::<i32>("later").build(point);
        assert_eq!(p, None);
        assert_eq!(forced.load(Ordering::SeqCst), 0);
    }
}

//! Typed binding between JSON documents and Rust values.
//!
//! A document is parsed into a [`JsonValue`] tree. Values are pulled out of
//! the tree by key path ([`JsonKeypath`]) and converted through the
//! [`FromJson`] / [`ToJson`] traits, which lift over `Option`, `Vec` and
//! string-keyed maps. [`RecordBuilder`] assembles several fields into a
//! record and calls its constructor only when all of them are present.
//!
//! # Example
//!
//! ```
//! use json_bind::JsonValue;
//!
//! let doc = JsonValue::decode_str(r#"{"user": {"id": 7, "tags": ["a", "b"]}}"#).unwrap();
//!
//! assert_eq!(doc.retrieve::<i64>(["user", "id"]), Some(7));
//! assert_eq!(doc.retrieve::<Vec<String>>(["user", "tags"]), Some(vec!["a".into(), "b".into()]));
//! assert_eq!(doc.retrieve::<i64>(["user", "missing"]), None);
//! ```

pub mod codec;
pub mod convert;
pub mod error;
pub mod format;
pub mod keypath;
pub mod lazy;
pub mod number;
pub mod record;
pub mod value;

pub use codec::{from_slice, from_str, to_string, to_vec, CodecError, CodecOptions, JsonCodec};
pub use convert::{FromJson, ToJson};
pub use error::{short_type_name, BoxError, JsonError, Result};
pub use format::{FormatView, Formatted, JsonFormatter};
pub use keypath::{resolve, JsonKeypath};
pub use lazy::LazyValue;
pub use number::JsonNumber;
pub use record::{Append, Construct, RecordBuilder};
pub use value::{JsonKind, JsonObject, JsonValue};

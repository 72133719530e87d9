//! Lifting conversions over sequences and string-keyed maps.
//!
//! All of them are fail-fast: the first element that fails to convert
//! aborts the whole conversion with that element's error.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use crate::error::{JsonError, Result};
use crate::value::{JsonObject, JsonValue};

use super::{FromJson, ToJson};

impl<T: FromJson> FromJson for Vec<T> {
    fn from_json(value: &JsonValue) -> Result<Self> {
        let items = value
            .as_array()
            .ok_or_else(|| JsonError::type_mismatch::<Vec<T>>(value))?;
        items.iter().map(T::from_json).collect()
    }
}

impl<T: ToJson> ToJson for [T] {
    fn to_json(&self) -> Result<JsonValue> {
        self.iter()
            .map(ToJson::to_json)
            .collect::<Result<Vec<_>>>()
            .map(JsonValue::Array)
    }
}

impl<T: ToJson> ToJson for Vec<T> {
    fn to_json(&self) -> Result<JsonValue> {
        self.as_slice().to_json()
    }
}

fn decode_entries<T, M>(value: &JsonValue) -> Result<M>
where
    T: FromJson,
    M: FromIterator<(String, T)>,
{
    let map = value
        .as_object()
        .ok_or_else(|| JsonError::type_mismatch::<M>(value))?;
    map.iter()
        .map(|(key, item)| T::from_json(item).map(|decoded| (key.clone(), decoded)))
        .collect()
}

fn encode_entries<'a, T, I>(entries: I) -> Result<JsonValue>
where
    T: ToJson + 'a,
    I: IntoIterator<Item = (&'a String, &'a T)>,
{
    entries
        .into_iter()
        .map(|(key, item)| item.to_json().map(|encoded| (key.clone(), encoded)))
        .collect::<Result<JsonObject>>()
        .map(JsonValue::Object)
}

impl<T: FromJson, S: BuildHasher + Default> FromJson for HashMap<String, T, S> {
    fn from_json(value: &JsonValue) -> Result<Self> {
        decode_entries(value)
    }
}

impl<T: FromJson> FromJson for BTreeMap<String, T> {
    fn from_json(value: &JsonValue) -> Result<Self> {
        decode_entries(value)
    }
}

impl<T: ToJson, S: BuildHasher> ToJson for HashMap<String, T, S> {
    fn to_json(&self) -> Result<JsonValue> {
        encode_entries(self)
    }
}

impl<T: ToJson> ToJson for BTreeMap<String, T> {
    fn to_json(&self) -> Result<JsonValue> {
        encode_entries(self)
    }
}

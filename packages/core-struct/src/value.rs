//! The Value type - the input tree a struct is built from.
//!
//! Anything assigned to an attribute arrives as a `Value`. The wrap engine
//! ([`structify`](crate::structify)) decides which shape it takes once stored.

use std::collections::BTreeMap;

use indexmap::IndexMap;

use crate::{AttrPath, Key, Lazy};

/// Insertion-ordered mapping used for keyed values and seeds.
pub type Map = IndexMap<Key, Value>;

/// A dynamically-typed value.
///
/// # Design Notes
///
/// - `Map` keeps insertion order. Whether a map is a list depends on the
///   order of its keys, so a sorted map would misclassify `{1: a, 0: b}`.
/// - `Lazy` is a value like any other; only the change-tracked store treats
///   it specially on read.
/// - Equality is structural, except for `Lazy` which compares by identity.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// Absence of a value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Signed 64-bit integer.
    Integer(i64),
    /// 64-bit floating point.
    Float(f64),
    /// UTF-8 string.
    String(String),
    /// Binary data.
    Bytes(Vec<u8>),
    /// Deferred computation.
    Lazy(Lazy),
    /// Ordered sequence of values.
    Array(Vec<Value>),
    /// Keyed values in insertion order.
    Map(Map),
}

impl Value {
    /// Create a null value.
    pub fn null() -> Self {
        Value::Null
    }

    /// Create an empty map.
    pub fn map() -> Self {
        Value::Map(Map::new())
    }

    /// Create an empty array.
    pub fn array() -> Self {
        Value::Array(Vec::new())
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if this value is a map.
    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    /// Check if this value is an array.
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Check if this value is a deferred computation.
    pub fn is_lazy(&self) -> bool {
        matches!(self, Value::Lazy(_))
    }

    /// Whether this value counts as empty.
    ///
    /// Empty values are `Null`, `false`, `0`, `0.0`, `""`, `"0"`, and empty
    /// bytes, arrays and maps. A `Lazy` is never empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Bool(b) => !b,
            Value::Integer(i) => *i == 0,
            Value::Float(f) => *f == 0.0,
            Value::String(s) => s.is_empty() || s == "0",
            Value::Bytes(b) => b.is_empty(),
            Value::Lazy(_) => false,
            Value::Array(arr) => arr.is_empty(),
            Value::Map(map) => map.is_empty(),
        }
    }

    /// Whether this value is an ordered list.
    ///
    /// Arrays always are. A map is a list when its keys, in order, are
    /// exactly `0, 1, .., n - 1`.
    pub fn is_list(&self) -> bool {
        match self {
            Value::Array(_) => true,
            Value::Map(map) => is_index_run(map),
            _ => false,
        }
    }

    /// Get the string content, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the integer content, if this is an integer.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get the map content, if this is a map.
    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Get a reference to a nested value by attribute path.
    ///
    /// Returns `None` if the path doesn't exist or can't be navigated
    /// (e.g., trying to index into a string). Lazy values are not entered.
    pub fn get(&self, path: &AttrPath) -> Option<&Value> {
        let mut current = self;
        for key in path.keys() {
            current = match current {
                Value::Map(map) => map.get(&key)?,
                Value::Array(arr) => {
                    let index = usize::try_from(key.as_int()?).ok()?;
                    arr.get(index)?
                }
                _ => return None,
            };
        }
        Some(current)
    }
}

pub(crate) fn is_index_run(map: &Map) -> bool {
    map.keys()
        .enumerate()
        .all(|(i, key)| key.as_int() == Some(i as i64))
}

// Conversion from common types

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<Lazy> for Value {
    fn from(v: Lazy) -> Self {
        Value::Lazy(v)
    }
}

impl From<Map> for Value {
    fn from(v: Map) -> Self {
        Value::Map(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Array(v.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<Key>, V: Into<Value>> From<BTreeMap<K, V>> for Value {
    fn from(v: BTreeMap<K, V>) -> Self {
        v.into_iter().collect()
    }
}

impl<K: Into<Key>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Map(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

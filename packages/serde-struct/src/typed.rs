//! Typed attribute access extension trait.

use serde::de::DeserializeOwned;
use serde::Serialize;

use openstruct_core::{AttributeStore, Error, Key, Value};

use crate::convert::{from_value, to_value, value_to_json};

/// Extension trait for typed reads and writes.
///
/// This trait is automatically implemented for every [`AttributeStore`].
/// Reads go through [`AttributeStore::resolve`], so a `TrackedStruct`
/// resolves lazy values before deserializing and exports its merged view.
///
/// # Example
///
/// ```rust
/// use openstruct_core::TrackedStruct;
/// use openstruct_serde::TypedAttributes;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize, PartialEq, Debug)]
/// struct Db {
///     host: String,
///     port: u16,
/// }
///
/// let mut config = TrackedStruct::new();
/// config.set_as("db", &Db { host: "localhost".into(), port: 5432 }).unwrap();
///
/// let db: Db = config.get_as("db").unwrap().unwrap();
/// assert_eq!(db.port, 5432);
/// ```
pub trait TypedAttributes: AttributeStore {
    /// Read an attribute and deserialize it into a Rust type.
    ///
    /// Returns `Ok(None)` if the key is missing.
    fn get_as<T: DeserializeOwned>(&self, key: impl Into<Key>) -> Result<Option<T>, Error> {
        let Some(value) = self.resolve(&key.into())? else {
            return Ok(None);
        };
        from_value(value).map(Some)
    }

    /// Serialize a Rust type and write it as an attribute.
    ///
    /// Serialized structs arrive as maps and are stored as nested structs.
    fn set_as<T: Serialize>(&mut self, key: impl Into<Key>, data: &T) -> Result<(), Error> {
        let value = to_value(data)?;
        self.set(key.into(), value);
        Ok(())
    }

    /// Export every visible attribute as JSON.
    fn to_json(&self) -> Result<serde_json::Value, Error> {
        value_to_json(self.to_value())
    }

    /// Deserialize the whole store into a Rust type.
    fn deserialize_into<T: DeserializeOwned>(&self) -> Result<T, Error> {
        from_value(self.to_value())
    }
}

// Blanket implementation for all stores
impl<S: AttributeStore> TypedAttributes for S {}

/// Build a store whose construction-time attributes are `data`'s fields.
///
/// `data` must serialize to a map (a struct, a map, or `serde_json::Value::Object`).
/// For a [`TrackedStruct`](openstruct_core::TrackedStruct) the result is clean.
pub fn seed_from<S: AttributeStore, T: Serialize>(data: &T) -> Result<S, Error> {
    match to_value(data)? {
        Value::Map(map) => Ok(S::from_map(map)),
        // unit-like inputs seed an empty store
        Value::Null => Ok(S::default()),
        other => Err(Error::decode(format!(
            "expected a map to seed attributes, got {:?}",
            other
        ))),
    }
}

//! OpenStruct - the basic attribute container.

use indexmap::IndexMap;

use crate::{structify, Attr, AttrPath, AttributeStore, Error, Key, Map, Value};

/// A struct whose attributes are assigned at runtime.
///
/// Every write passes through [`structify`], so nested maps become nested
/// `OpenStruct`s and attribute access works at every depth. Reads return the
/// stored form as-is: a [`Lazy`](crate::Lazy) comes back unresolved.
///
/// # Example
///
/// ```rust
/// use openstruct_core::{attr_path, OpenStruct, Value};
///
/// let mut user = OpenStruct::new();
/// user.set("name", "Alice");
/// user.set("address", [("city", "Paris")].into_iter().collect::<Value>());
///
/// // indexed access
/// let address = user.get("address").and_then(|a| a.as_struct()).unwrap();
/// assert_eq!(address.get("city").unwrap(), &Value::from("Paris"));
///
/// // named access
/// assert_eq!(user.lookup(&attr_path!("address.city")).unwrap(), &Value::from("Paris"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct OpenStruct {
    attributes: IndexMap<Key, Attr<OpenStruct>>,
}

impl OpenStruct {
    /// Create an empty struct.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a struct seeded from `seed`, one write per entry.
    pub fn from_map(seed: Map) -> Self {
        let mut s = Self::new();
        for (key, value) in seed {
            s.set(key, value);
        }
        s
    }

    /// Whether `key` holds an attribute.
    pub fn exists(&self, key: impl Into<Key>) -> bool {
        self.attributes.contains_key(&key.into())
    }

    /// Read an attribute. Missing keys read as `None`.
    pub fn get(&self, key: impl Into<Key>) -> Option<&Attr<OpenStruct>> {
        self.attributes.get(&key.into())
    }

    /// Mutable access to an attribute, e.g. to reach into a nested struct.
    pub fn get_mut(&mut self, key: impl Into<Key>) -> Option<&mut Attr<OpenStruct>> {
        self.attributes.get_mut(&key.into())
    }

    /// Write an attribute, replacing any previous value.
    ///
    /// An existing key keeps its position.
    pub fn set(&mut self, key: impl Into<Key>, value: impl Into<Value>) {
        self.attributes.insert(key.into(), structify(value.into()));
    }

    /// Remove an attribute. Removing a missing key does nothing.
    pub fn delete(&mut self, key: impl Into<Key>) -> Option<Attr<OpenStruct>> {
        self.attributes.shift_remove(&key.into())
    }

    /// Read an attribute by dotted path.
    pub fn lookup(&self, path: &AttrPath) -> Option<&Attr<OpenStruct>> {
        self.lookup_raw(path)
    }

    /// Iterate over attributes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Attr<OpenStruct>)> {
        self.attributes.iter()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.attributes.keys()
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Check if there are no attributes.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Unwrap into a plain [`Value::Map`].
    pub fn into_value(self) -> Value {
        Value::Map(
            self.attributes
                .into_iter()
                .map(|(k, attr)| (k, attr.to_value()))
                .collect(),
        )
    }
}

impl AttributeStore for OpenStruct {
    fn from_map(seed: Map) -> Self {
        OpenStruct::from_map(seed)
    }

    fn exists(&self, key: &Key) -> bool {
        self.attributes.contains_key(key)
    }

    fn get_raw(&self, key: &Key) -> Option<&Attr<Self>> {
        self.attributes.get(key)
    }

    fn get_mut(&mut self, key: &Key) -> Option<&mut Attr<Self>> {
        self.attributes.get_mut(key)
    }

    fn set(&mut self, key: Key, value: Value) {
        OpenStruct::set(self, key, value)
    }

    fn delete(&mut self, key: &Key) -> Option<Attr<Self>> {
        self.attributes.shift_remove(key)
    }

    fn resolve(&self, key: &Key) -> Result<Option<Value>, Error> {
        Ok(self.attributes.get(key).map(Attr::to_value))
    }

    fn keys(&self) -> Vec<Key> {
        self.attributes.keys().cloned().collect()
    }

    fn len(&self) -> usize {
        self.attributes.len()
    }

    fn to_value(&self) -> Value {
        Value::Map(
            self.attributes
                .iter()
                .map(|(k, attr)| (k.clone(), attr.to_value()))
                .collect(),
        )
    }
}

impl From<Map> for OpenStruct {
    fn from(seed: Map) -> Self {
        OpenStruct::from_map(seed)
    }
}

impl<K: Into<Key>, V: Into<Value>> FromIterator<(K, V)> for OpenStruct {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut s = OpenStruct::new();
        for (key, value) in iter {
            s.set(key, value);
        }
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{attr_path, Lazy};
    use collection_literals::btree;

    #[test]
    fn assigning_simple_key_and_simple_value() {
        let mut s = OpenStruct::new();
        s.set("foo", 1);
        assert_eq!(s.get("foo").unwrap(), &Value::from(1));
    }

    #[test]
    fn assigning_simple_key_and_lazy_value_returns_it_unresolved() {
        let lazy = Lazy::from_fn(|| 1);
        let mut s = OpenStruct::new();
        s.set("foo", lazy.clone());

        let stored = s.get("foo").and_then(Attr::as_value).unwrap();
        assert_eq!(stored, &Value::Lazy(lazy.clone()));
        assert_eq!(lazy.resolve().unwrap(), Value::from(1));
        assert_eq!(s.resolve(&Key::from("foo")).unwrap(), Some(Value::Lazy(lazy)));
    }

    #[test]
    fn assigning_simple_key_and_map_value() {
        let mut s = OpenStruct::new();
        s.set("foo", Value::from(btree! { "bar" => 1 }));

        let foo = s.get("foo").and_then(Attr::as_struct).unwrap();
        assert_eq!(foo.get("bar").unwrap(), &Value::from(1));
        assert_eq!(s.lookup(&attr_path!("foo.bar")).unwrap(), &Value::from(1));
    }

    #[test]
    fn assigning_simple_key_and_list_value() {
        let mut s = OpenStruct::new();
        s.set("foo", vec![1]);
        assert_eq!(s.get("foo").unwrap(), &Value::from(vec![1]));

        s.set("bar", vec![1, 2, 3]);
        assert_eq!(s.get("bar").unwrap(), &Value::from(vec![1, 2, 3]));
    }

    #[test]
    fn seeded_values() {
        let s = OpenStruct::from_map(
            [
                (Key::from("foo"), Value::from(1)),
                (Key::from("nested"), Value::from(btree! { "bar" => 1 })),
                (Key::from("list"), Value::from(vec![1])),
            ]
            .into_iter()
            .collect(),
        );

        assert_eq!(s.get("foo").unwrap(), &Value::from(1));
        assert_eq!(s.lookup(&attr_path!("nested.bar")).unwrap(), &Value::from(1));
        assert_eq!(s.get("list").unwrap(), &Value::from(vec![1]));
    }

    #[test]
    fn named_and_indexed_access_agree() {
        let mut s: OpenStruct = [("foo", 1)].into_iter().collect();
        assert_eq!(
            s.get("foo").map(Attr::to_value),
            s.lookup(&attr_path!("foo")).map(Attr::to_value)
        );

        s.assign(&attr_path!("bar"), Value::from("x"));
        assert_eq!(s.get("bar").unwrap(), &Value::from("x"));
        assert!(s.exists("bar"));
        assert!(s.contains(&attr_path!("bar")));
    }

    #[test]
    fn non_identifier_keys_need_indexed_access() {
        let mut s = OpenStruct::new();
        s.set("first-name", "Ada");
        assert_eq!(s.get("first-name").unwrap(), &Value::from("Ada"));
        assert!(AttrPath::parse("first-name").is_err());
    }

    #[test]
    fn overwrite_is_unconditional() {
        let mut s = OpenStruct::new();
        s.set("foo", 1);
        s.set("foo", "two");
        assert_eq!(s.get("foo").unwrap(), &Value::from("two"));
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn missing_keys_read_as_none() {
        let s = OpenStruct::new();
        assert!(s.get("nope").is_none());
        assert!(!s.exists("nope"));
        assert!(s.lookup(&attr_path!("nope.deeper")).is_none());
    }

    #[test]
    fn unsetting_a_top_level_key() {
        let mut s: OpenStruct = [("foo", 1)].into_iter().collect();
        assert!(s.delete("foo").is_some());
        assert!(s.get("foo").is_none());
        assert!(s.delete("foo").is_none());
    }

    #[test]
    fn unsetting_a_nested_key() {
        let mut s = OpenStruct::new();
        s.set("foo", Value::from(btree! { "bar" => 1 }));

        s.get_mut("foo")
            .and_then(Attr::as_struct_mut)
            .unwrap()
            .delete("bar");
        assert!(s.lookup(&attr_path!("foo.bar")).is_none());
        assert!(s.exists("foo"));
    }

    #[test]
    fn delete_keeps_remaining_order() {
        let mut s: OpenStruct = [("a", 1), ("b", 2), ("c", 3)].into_iter().collect();
        s.set("a", 10);
        s.delete("b");
        let keys: Vec<_> = s.keys().cloned().collect();
        assert_eq!(keys, vec![Key::from("a"), Key::from("c")]);
    }

    #[test]
    fn into_value_unwraps_everything() {
        let seed = Value::from(btree! { "a" => Value::from(btree! { "b" => 1 }) });
        let mut s = OpenStruct::new();
        s.set("root", seed.clone());
        let expected: Value = [("root", seed)].into_iter().collect();
        assert_eq!(s.to_value(), expected);
        assert_eq!(s.into_value(), expected);
    }
}

//! TrackedStruct - an attribute container that knows what changed.
//!
//! Attributes live in two tiers:
//! - the baseline, written while the struct is being constructed
//! - the changed tier, holding only keys whose value differs from baseline
//!
//! Reads consult the changed tier first. Writing a key back to its baseline
//! value removes it from the changed tier, so the struct is clean again.

use std::borrow::Cow;

use indexmap::IndexMap;

use crate::{structify, Attr, AttrPath, AttributeStore, Error, Key, Map, Value};

/// A struct with change tracking and lazy attribute values.
///
/// # Example
///
/// ```rust
/// use openstruct_core::{TrackedStruct, Value};
///
/// let mut s: TrackedStruct = [("foo", "foo")].into_iter().collect();
/// assert!(!s.dirty());
///
/// s.set("foo", "bar");
/// assert!(s.dirty());
///
/// s.set("foo", "foo");
/// assert!(!s.dirty());
/// ```
///
/// # Lazy values
///
/// A [`Lazy`](crate::Lazy) attribute is invoked on every [`get`](Self::get)
/// and its result is returned in its place. Errors from the computation are
/// returned unchanged.
///
/// # Nested structs
///
/// Maps assigned to a `TrackedStruct` become nested `TrackedStruct`s that
/// are built empty and then written to, so their keys all sit in their own
/// changed tier. Mutating a nested struct never marks the parent dirty.
#[derive(Clone, Debug)]
pub struct TrackedStruct {
    /// Construction-time values.
    attributes: IndexMap<Key, Attr<TrackedStruct>>,
    /// Values that differ from `attributes`.
    changed: IndexMap<Key, Attr<TrackedStruct>>,
    /// False only while the seed is being written.
    initialized: bool,
}

impl Default for TrackedStruct {
    fn default() -> Self {
        Self {
            attributes: IndexMap::new(),
            changed: IndexMap::new(),
            initialized: true,
        }
    }
}

impl TrackedStruct {
    /// Create an empty struct. Every later write counts as a change.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a struct whose baseline is `seed`.
    pub fn from_map(seed: Map) -> Self {
        let mut s = Self {
            initialized: false,
            ..Self::default()
        };
        for (key, value) in seed {
            s.set(key, value);
        }
        s.initialized = true;
        tracing::trace!(attributes = s.attributes.len(), "tracked struct constructed");
        s
    }

    /// Whether construction has finished.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Whether `key` holds an attribute in either tier.
    pub fn exists(&self, key: impl Into<Key>) -> bool {
        let key = key.into();
        self.changed.contains_key(&key) || self.attributes.contains_key(&key)
    }

    /// Read an attribute, resolving lazy values.
    ///
    /// Stored values are borrowed. A lazy value is invoked and its result is
    /// returned as an owned [`Attr::Value`]; an error from it is returned as-is.
    /// Missing keys read as `Ok(None)`.
    pub fn get(
        &self,
        key: impl Into<Key>,
    ) -> Result<Option<Cow<'_, Attr<TrackedStruct>>>, Error> {
        let key = key.into();
        match self.get_raw(&key) {
            Some(stored) => resolve_stored(&key, stored).map(Some),
            None => Ok(None),
        }
    }

    /// Read the stored form of an attribute, changed tier first.
    pub fn get_raw(&self, key: impl Into<Key>) -> Option<&Attr<TrackedStruct>> {
        let key = key.into();
        self.changed.get(&key).or_else(|| self.attributes.get(&key))
    }

    /// Mutable access to the stored form of an attribute, changed tier first.
    ///
    /// Changes made through this reference bypass tracking for `key` itself;
    /// use it to reach into nested structs.
    pub fn get_mut(&mut self, key: impl Into<Key>) -> Option<&mut Attr<TrackedStruct>> {
        let key = key.into();
        if self.changed.contains_key(&key) {
            return self.changed.get_mut(&key);
        }
        self.attributes.get_mut(&key)
    }

    /// Write an attribute.
    ///
    /// During construction the value becomes the baseline. Afterwards it is
    /// recorded as a change, unless it is strictly equal to the baseline, in
    /// which case any earlier change to `key` is dropped.
    pub fn set(&mut self, key: impl Into<Key>, value: impl Into<Value>) {
        let key = key.into();
        let wrapped = structify(value.into());

        if !self.initialized {
            self.attributes.insert(key, wrapped);
            return;
        }

        match self.attributes.get(&key) {
            Some(base) if base.strict_eq(&wrapped) => {
                if self.changed.shift_remove(&key).is_some() {
                    tracing::debug!(%key, "attribute restored to baseline");
                }
            }
            _ => {
                tracing::trace!(%key, "attribute changed");
                self.changed.insert(key, wrapped);
            }
        }
    }

    /// Remove an attribute from both tiers, returning what was visible.
    pub fn delete(&mut self, key: impl Into<Key>) -> Option<Attr<TrackedStruct>> {
        let key = key.into();
        let changed = self.changed.shift_remove(&key);
        let base = self.attributes.shift_remove(&key);
        if changed.is_some() || base.is_some() {
            tracing::trace!(%key, "attribute deleted");
        }
        changed.or(base)
    }

    /// Read an attribute by dotted path, resolving a lazy value at the end.
    ///
    /// Intermediate components are navigated without resolution.
    pub fn lookup(
        &self,
        path: &AttrPath,
    ) -> Result<Option<Cow<'_, Attr<TrackedStruct>>>, Error> {
        let Some(stored) = self.lookup_raw(path) else {
            return Ok(None);
        };
        let key = path.split_last().map(|(_, last)| last.clone());
        match key {
            Some(key) => resolve_stored(&key, stored).map(Some),
            None => Ok(None),
        }
    }

    /// Whether any attribute differs from its baseline.
    pub fn dirty(&self) -> bool {
        !self.changed.is_empty()
    }

    /// Whether `key` differs from its baseline.
    pub fn is_changed(&self, key: impl Into<Key>) -> bool {
        self.changed.contains_key(&key.into())
    }

    /// Keys that differ from their baseline, in the order they first changed.
    pub fn changed_keys(&self) -> impl Iterator<Item = &Key> {
        self.changed.keys()
    }

    /// Every visible attribute: baseline overlaid by changes.
    ///
    /// Baseline keys keep their position; keys that only exist as changes
    /// follow. The result is a copy.
    pub fn attributes(&self) -> IndexMap<Key, Attr<TrackedStruct>> {
        let mut merged = self.attributes.clone();
        for (key, attr) in &self.changed {
            merged.insert(key.clone(), attr.clone());
        }
        merged
    }

    /// A copy of the changed tier alone.
    pub fn changed_attributes(&self) -> IndexMap<Key, Attr<TrackedStruct>> {
        self.changed.clone()
    }

    /// Make the current values the new baseline.
    pub fn commit(&mut self) {
        let count = self.changed.len();
        for (key, attr) in self.changed.drain(..) {
            self.attributes.insert(key, attr);
        }
        tracing::debug!(count, "changes committed");
    }

    /// Drop every change, reverting to the baseline.
    ///
    /// Keys that were only ever set after construction disappear.
    pub fn discard(&mut self) {
        let count = self.changed.len();
        self.changed.clear();
        tracing::debug!(count, "changes discarded");
    }

    /// Number of visible attributes.
    pub fn len(&self) -> usize {
        self.attributes.len()
            + self
                .changed
                .keys()
                .filter(|k| !self.attributes.contains_key(*k))
                .count()
    }

    /// Check if there are no visible attributes.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty() && self.changed.is_empty()
    }

    fn merged_keys(&self) -> impl Iterator<Item = &Key> {
        self.attributes.keys().chain(
            self.changed
                .keys()
                .filter(|k| !self.attributes.contains_key(*k)),
        )
    }
}

fn resolve_stored<'a>(
    key: &Key,
    stored: &'a Attr<TrackedStruct>,
) -> Result<Cow<'a, Attr<TrackedStruct>>, Error> {
    match stored {
        Attr::Value(Value::Lazy(lazy)) => {
            tracing::trace!(%key, "resolving lazy attribute");
            Ok(Cow::Owned(Attr::Value(lazy.resolve()?)))
        }
        _ => Ok(Cow::Borrowed(stored)),
    }
}

impl AttributeStore for TrackedStruct {
    fn from_map(seed: Map) -> Self {
        TrackedStruct::from_map(seed)
    }

    fn exists(&self, key: &Key) -> bool {
        TrackedStruct::exists(self, key)
    }

    fn get_raw(&self, key: &Key) -> Option<&Attr<Self>> {
        TrackedStruct::get_raw(self, key)
    }

    fn get_mut(&mut self, key: &Key) -> Option<&mut Attr<Self>> {
        TrackedStruct::get_mut(self, key)
    }

    fn set(&mut self, key: Key, value: Value) {
        TrackedStruct::set(self, key, value)
    }

    fn delete(&mut self, key: &Key) -> Option<Attr<Self>> {
        TrackedStruct::delete(self, key)
    }

    fn resolve(&self, key: &Key) -> Result<Option<Value>, Error> {
        Ok(self.get(key)?.map(|attr| attr.to_value()))
    }

    fn keys(&self) -> Vec<Key> {
        self.merged_keys().cloned().collect()
    }

    fn len(&self) -> usize {
        TrackedStruct::len(self)
    }

    fn to_value(&self) -> Value {
        Value::Map(
            self.merged_keys()
                .filter_map(|key| Some((key.clone(), self.get_raw(key)?.to_value())))
                .collect(),
        )
    }
}

impl From<Map> for TrackedStruct {
    fn from(seed: Map) -> Self {
        TrackedStruct::from_map(seed)
    }
}

impl<K: Into<Key>, V: Into<Value>> FromIterator<(K, V)> for TrackedStruct {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        TrackedStruct::from_map(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

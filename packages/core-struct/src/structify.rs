//! The wrap engine and the store trait it builds on.

use crate::value::is_index_run;
use crate::{Attr, AttrPath, Error, Key, Map, Value};

/// An attribute container the wrap engine can build.
///
/// Both [`OpenStruct`](crate::OpenStruct) and [`TrackedStruct`](crate::TrackedStruct)
/// implement this. The methods take owned or borrowed [`Key`]s; the stores
/// also offer inherent `impl Into<Key>` versions of the same operations.
pub trait AttributeStore: Default + Sized {
    /// Build a store whose construction-time contents are `seed`.
    ///
    /// Each entry goes through the store's normal write path.
    fn from_map(seed: Map) -> Self;

    /// Whether `key` holds an attribute.
    fn exists(&self, key: &Key) -> bool;

    /// The stored form of `key`, without lazy resolution.
    fn get_raw(&self, key: &Key) -> Option<&Attr<Self>>;

    /// Mutable access to the stored form of `key`.
    fn get_mut(&mut self, key: &Key) -> Option<&mut Attr<Self>>;

    /// Structify `value` and store it under `key`.
    fn set(&mut self, key: Key, value: Value);

    /// Remove `key`, returning what was visible under it.
    fn delete(&mut self, key: &Key) -> Option<Attr<Self>>;

    /// The value a reader of `key` sees, as a plain [`Value`].
    ///
    /// This applies the store's own rule for lazy values.
    fn resolve(&self, key: &Key) -> Result<Option<Value>, Error>;

    /// Visible keys, in order.
    fn keys(&self) -> Vec<Key>;

    /// Number of visible attributes.
    fn len(&self) -> usize;

    /// Check if the store holds no attributes.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot every visible attribute as a [`Value::Map`].
    fn to_value(&self) -> Value;

    /// Follow a dotted path through nested structs and lists.
    ///
    /// Every component goes through [`get_raw`](Self::get_raw) of the struct
    /// it lands in. Returns `None` for the empty path.
    fn lookup_raw(&self, path: &AttrPath) -> Option<&Attr<Self>> {
        let mut keys = path.keys();
        let mut current = self.get_raw(&keys.next()?)?;
        for key in keys {
            current = match current {
                Attr::Struct(s) => s.get_raw(&key)?,
                Attr::List(items) => items.get(list_index(&key)?)?,
                Attr::Value(_) => return None,
            };
        }
        Some(current)
    }

    /// Mutable counterpart of [`lookup_raw`](Self::lookup_raw).
    fn lookup_mut(&mut self, path: &AttrPath) -> Option<&mut Attr<Self>> {
        let mut keys = path.keys();
        let mut current = self.get_mut(&keys.next()?)?;
        for key in keys {
            current = match current {
                Attr::Struct(s) => s.get_mut(&key)?,
                Attr::List(items) => items.get_mut(list_index(&key)?)?,
                Attr::Value(_) => return None,
            };
        }
        Some(current)
    }

    /// Whether a dotted path leads to an attribute.
    fn contains(&self, path: &AttrPath) -> bool {
        let Some((parent, last)) = path.split_last() else {
            return false;
        };
        if parent.is_empty() {
            return self.exists(last);
        }
        match self.lookup_raw(&parent) {
            Some(Attr::Struct(s)) => s.exists(last),
            Some(Attr::List(items)) => list_index(last).is_some_and(|i| i < items.len()),
            _ => false,
        }
    }

    /// Write `value` at a dotted path.
    ///
    /// The write lands in the struct that owns the final component, through
    /// that struct's own `set`. Replacing a list element rewrites the whole
    /// list through the `set` of the struct that owns the list, so change
    /// tracking sees it. Returns `false` if the parent does not exist.
    fn assign(&mut self, path: &AttrPath, value: Value) -> bool {
        let keys: Vec<Key> = path.keys().collect();
        assign_at(self, &keys, value)
    }

    /// Delete the attribute at a dotted path.
    ///
    /// Only the struct owning the final component is touched. Returns what
    /// was removed.
    fn remove(&mut self, path: &AttrPath) -> Option<Attr<Self>> {
        let (parent, last) = path.split_last()?;
        if parent.is_empty() {
            return self.delete(last);
        }
        match self.lookup_mut(&parent)? {
            Attr::Struct(s) => s.delete(last),
            _ => None,
        }
    }
}

fn list_index(key: &Key) -> Option<usize> {
    usize::try_from(key.as_int()?).ok()
}

fn assign_at<S: AttributeStore>(store: &mut S, keys: &[Key], value: Value) -> bool {
    let Some((owner_key, rest)) = keys.split_first() else {
        return false;
    };
    if rest.is_empty() {
        store.set(owner_key.clone(), value);
        return true;
    }

    let mut items = match store.get_mut(owner_key) {
        Some(Attr::Struct(nested)) => return assign_at(nested, rest, value),
        Some(Attr::List(items)) => items,
        _ => return false,
    };

    // Walk nested lists. A struct met on the way takes the rest of the write
    // itself; otherwise the final index replaces an element.
    let mut indices = rest;
    while let [head, tail @ ..] = indices {
        let slot = match list_index(head) {
            Some(i) => items.get_mut(i),
            None => None,
        };
        let Some(slot) = slot else {
            return false;
        };
        if tail.is_empty() {
            break;
        }
        match slot {
            Attr::List(inner) => items = inner,
            Attr::Struct(nested) => return assign_at(nested, tail, value),
            Attr::Value(_) => return false,
        }
        indices = tail;
    }

    let Some(mut whole) = store.get_raw(owner_key).map(Attr::to_value) else {
        return false;
    };
    let mut target = &mut whole;
    for key in rest {
        target = match (target, list_index(key)) {
            (Value::Array(elements), Some(i)) => match elements.get_mut(i) {
                Some(element) => element,
                None => return false,
            },
            _ => return false,
        };
    }
    *target = value;
    tracing::trace!(key = %owner_key, "rewriting list after element replacement");
    store.set(owner_key.clone(), whole);
    true
}

/// Convert a value into its stored form.
///
/// - Empty values (see [`Value::is_empty`]) are returned as-is. An empty map
///   or array is *not* turned into an empty struct or list.
/// - Arrays, and maps keyed `0..n` in order, become [`Attr::List`] with each
///   element structified.
/// - Any other map becomes a fresh `S`, filled entry by entry through
///   [`AttributeStore::set`].
/// - Everything else, lazy values included, is stored unchanged.
///
/// # Example
///
/// ```rust
/// use openstruct_core::{structify, Attr, OpenStruct, Value};
///
/// let seed: Value = [("bar", 1)].into_iter().collect();
/// let stored: Attr<OpenStruct> = structify(seed);
/// assert!(stored.as_struct().is_some());
///
/// let empty: Attr<OpenStruct> = structify(Value::array());
/// assert_eq!(empty.as_value(), Some(&Value::array()));
/// ```
pub fn structify<S: AttributeStore>(value: Value) -> Attr<S> {
    if value.is_empty() {
        return Attr::Value(value);
    }

    match value {
        Value::Array(items) => Attr::List(items.into_iter().map(structify).collect()),
        Value::Map(map) if is_index_run(&map) => {
            Attr::List(map.into_values().map(structify).collect())
        }
        Value::Map(map) => {
            tracing::trace!(entries = map.len(), "wrapping map as nested struct");
            let mut nested = S::default();
            for (key, sub) in map {
                nested.set(key, sub);
            }
            Attr::Struct(nested)
        }
        other => Attr::Value(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{attr_path, Lazy, OpenStruct};

    type Stored = Attr<OpenStruct>;

    #[test]
    fn scalars_pass_through() {
        for value in [
            Value::from(1),
            Value::from(2.5),
            Value::from("foo"),
            Value::from(true),
            Value::from(vec![0u8, 1]),
        ] {
            let stored: Stored = structify(value.clone());
            assert_eq!(stored.as_value(), Some(&value));
        }
    }

    #[test]
    fn lazy_passes_through_unresolved() {
        let lazy = Lazy::from_fn(|| 1);
        let stored: Stored = structify(Value::from(lazy.clone()));
        assert_eq!(stored.as_value(), Some(&Value::Lazy(lazy)));
    }

    #[test]
    fn empty_containers_are_returned_unchanged() {
        let stored: Stored = structify(Value::array());
        assert_eq!(stored.as_value(), Some(&Value::array()));

        let stored: Stored = structify(Value::map());
        assert_eq!(stored.as_value(), Some(&Value::map()));

        let stored: Stored = structify(Value::from(""));
        assert_eq!(stored.as_value(), Some(&Value::from("")));
    }

    #[test]
    fn keyed_map_becomes_struct() {
        let seed: Value = [("bar", 1)].into_iter().collect();
        let stored: Stored = structify(seed);
        let nested = stored.as_struct().unwrap();
        assert_eq!(nested.get("bar").and_then(Attr::as_value), Some(&Value::from(1)));
    }

    #[test]
    fn single_element_list_stays_a_list() {
        let stored: Stored = structify(Value::from(vec![1]));
        assert_eq!(stored.as_list().map(<[_]>::len), Some(1));

        let indexed: Value = [(0, "x")].into_iter().collect();
        let stored: Stored = structify(indexed);
        assert!(stored.as_list().is_some());
    }

    #[test]
    fn list_elements_are_wrapped() {
        let value = Value::Array(vec![
            Value::from(1),
            [("name", "a")].into_iter().collect(),
            Value::Array(vec![[("deep", true)].into_iter().collect()]),
        ]);
        let stored: Stored = structify(value.clone());
        let items = stored.as_list().unwrap();
        assert_eq!(items.len(), 3);
        assert!(items[1].as_struct().is_some());
        assert!(items[2].as_list().unwrap()[0].as_struct().is_some());
        assert_eq!(stored, value);
    }

    #[test]
    fn nested_maps_wrap_at_every_depth() {
        let value: Value = [(
            "a",
            [("b", [("c", 3)].into_iter().collect::<Value>())]
                .into_iter()
                .collect::<Value>(),
        )]
        .into_iter()
        .collect();
        let stored: Stored = structify(value);
        let a = stored.as_struct().unwrap();
        let b = a.get("a").and_then(Attr::as_struct).unwrap();
        let c = b.get("b").and_then(Attr::as_struct).unwrap();
        assert_eq!(c.get("c").and_then(Attr::as_value), Some(&Value::from(3)));
    }

    #[test]
    fn path_helpers_through_lists() {
        let mut s = OpenStruct::new();
        s.set(
            "items",
            Value::Array(vec![
                [("name", "a")].into_iter().collect(),
                [("name", "b")].into_iter().collect(),
            ]),
        );

        assert_eq!(s.lookup_raw(&attr_path!("items.1.name")).unwrap(), &Value::from("b"));
        assert!(s.contains(&attr_path!("items.1")));
        assert!(!s.contains(&attr_path!("items.2")));

        assert!(s.assign(&attr_path!("items.0.name"), Value::from("z")));
        assert!(s.assign(&attr_path!("items.1"), Value::from(7)));
        assert!(!s.assign(&attr_path!("items.5"), Value::from(7)));
        assert!(!s.assign(&attr_path!("missing.name"), Value::from(7)));
        assert_eq!(s.lookup_raw(&attr_path!("items.0.name")).unwrap(), &Value::from("z"));
        assert_eq!(s.lookup_raw(&attr_path!("items.1")).unwrap(), &Value::from(7));

        assert!(s.remove(&attr_path!("items.0.name")).is_some());
        assert!(!s.contains(&attr_path!("items.0.name")));
        assert!(s.remove(&attr_path!("items.1")).is_none());
    }
}

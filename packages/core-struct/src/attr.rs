//! The stored form of an attribute.

use crate::{AttributeStore, Value};

/// A value after it has been through [`structify`](crate::structify).
///
/// `S` is the store that owns the attribute, so a mapping nested inside an
/// [`OpenStruct`](crate::OpenStruct) is itself an `OpenStruct`, and one nested
/// inside a [`TrackedStruct`](crate::TrackedStruct) is a `TrackedStruct`.
#[derive(Clone, Debug)]
pub enum Attr<S> {
    /// Scalar, lazy, or empty container, stored exactly as given.
    Value(Value),
    /// A keyed mapping wrapped as a nested struct.
    Struct(S),
    /// An ordered list, each element wrapped in turn.
    List(Vec<Attr<S>>),
}

impl<S> Attr<S> {
    /// The stored value, if this attribute was not wrapped.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Attr::Value(v) => Some(v),
            _ => None,
        }
    }

    /// The nested struct, if this attribute is one.
    pub fn as_struct(&self) -> Option<&S> {
        match self {
            Attr::Struct(s) => Some(s),
            _ => None,
        }
    }

    /// Mutable access to the nested struct.
    ///
    /// Mutations through this reference only touch the nested struct's own
    /// attributes; the parent's change tracking never sees them.
    pub fn as_struct_mut(&mut self) -> Option<&mut S> {
        match self {
            Attr::Struct(s) => Some(s),
            _ => None,
        }
    }

    /// The wrapped list elements, if this attribute is a list.
    pub fn as_list(&self) -> Option<&[Attr<S>]> {
        match self {
            Attr::List(items) => Some(items),
            _ => None,
        }
    }

    /// Mutable access to the wrapped list elements.
    pub fn as_list_mut(&mut self) -> Option<&mut Vec<Attr<S>>> {
        match self {
            Attr::List(items) => Some(items),
            _ => None,
        }
    }

    /// Check if this attribute holds null.
    pub fn is_null(&self) -> bool {
        matches!(self, Attr::Value(Value::Null))
    }

    /// Equality as seen by change tracking.
    ///
    /// Scalars compare by value and type (`1` is not `1.0`), lazy values by
    /// identity, lists element by element. Structs never compare equal: every
    /// write builds a fresh instance, so two of them are never the same one.
    pub fn strict_eq(&self, other: &Attr<S>) -> bool {
        match (self, other) {
            (Attr::Value(a), Attr::Value(b)) => a == b,
            (Attr::List(a), Attr::List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.strict_eq(y))
            }
            _ => false,
        }
    }
}

impl<S: AttributeStore> Attr<S> {
    /// Snapshot this attribute as a plain [`Value`].
    ///
    /// Nested structs become maps of their visible attributes and lists
    /// become arrays. Lazy values are copied, not resolved.
    pub fn to_value(&self) -> Value {
        match self {
            Attr::Value(v) => v.clone(),
            Attr::Struct(s) => s.to_value(),
            Attr::List(items) => Value::Array(items.iter().map(Attr::to_value).collect()),
        }
    }
}

impl<S: AttributeStore> PartialEq<Value> for Attr<S> {
    fn eq(&self, other: &Value) -> bool {
        self.to_value() == *other
    }
}

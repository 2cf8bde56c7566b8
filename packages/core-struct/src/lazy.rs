//! Lazy - a deferred attribute value.
//!
//! A `Lazy` stored in a [`TrackedStruct`](crate::TrackedStruct) is invoked on
//! every read and its result is what the caller sees. [`OpenStruct`](crate::OpenStruct)
//! hands the `Lazy` back untouched.

use std::fmt;
use std::rc::Rc;

use crate::{Error, Value};

type Thunk = dyn Fn() -> Result<Value, Error>;

/// A shared, zero-argument computation producing a [`Value`].
///
/// Clones share the same computation, and equality is identity: two `Lazy`
/// handles are equal only if they point at the same closure.
///
/// # Example
///
/// ```rust
/// use openstruct_core::{Lazy, Value};
///
/// let answer = Lazy::from_fn(|| 42);
/// assert_eq!(answer.resolve().unwrap(), Value::Integer(42));
/// ```
///
/// Not `Send`: structs are single-threaded containers.
#[derive(Clone)]
pub struct Lazy {
    thunk: Rc<Thunk>,
}

impl Lazy {
    /// Create a lazy value from a fallible computation.
    ///
    /// An error returned here is handed to the reader unchanged.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() -> Result<Value, Error> + 'static,
    {
        Self { thunk: Rc::new(f) }
    }

    /// Create a lazy value from an infallible computation.
    pub fn from_fn<F, V>(f: F) -> Self
    where
        F: Fn() -> V + 'static,
        V: Into<Value>,
    {
        Self::new(move || Ok(f().into()))
    }

    /// Run the computation. Nothing is cached; each call invokes it again.
    pub fn resolve(&self) -> Result<Value, Error> {
        (self.thunk)()
    }

    /// Whether two handles share one computation.
    pub fn ptr_eq(&self, other: &Lazy) -> bool {
        Rc::ptr_eq(&self.thunk, &other.thunk)
    }
}

impl PartialEq for Lazy {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Lazy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lazy")
            .field("shared", &Rc::strong_count(&self.thunk))
            .finish_non_exhaustive()
    }
}

//! OpenStruct core: dynamic attribute containers.
//!
//! This layer holds everything needed to assign attributes at runtime:
//! - `Value`: the input tree (scalars, lazy values, arrays, maps)
//! - `structify`: the wrap engine turning maps into nested structs
//! - `OpenStruct`: the basic attribute store
//! - `TrackedStruct`: an attribute store with change tracking and lazy values
//! - `AttrPath`: dotted paths for named access
//!
//! Both stores expose indexed access (`get("key")`) as the primitive. Named
//! access (`lookup(&attr_path!("a.b"))`) walks nested structs through those
//! same indexed operations.
//!
//! # Example
//!
//! ```rust
//! use openstruct_core::{attr_path, TrackedStruct, Value};
//!
//! let mut config: TrackedStruct = [("port", 8080)].into_iter().collect();
//! config.set("db", [("host", "localhost")].into_iter().collect::<Value>());
//!
//! let host = config.lookup(&attr_path!("db.host")).unwrap().unwrap();
//! assert_eq!(host.into_owned(), Value::from("localhost"));
//! assert!(config.dirty());
//! ```

mod attr;
mod error;
mod key;
mod lazy;
mod open_struct;
mod path;
mod structify;
mod tracked_struct;
mod value;

pub use attr::Attr;
pub use error::Error;
pub use key::Key;
pub use lazy::Lazy;
pub use open_struct::OpenStruct;
pub use path::{AttrPath, PathError};
pub use structify::{structify, AttributeStore};
pub use tracked_struct::TrackedStruct;
pub use value::{Map, Value};

// Re-export for callers building seeds and reading views
pub use indexmap::IndexMap;

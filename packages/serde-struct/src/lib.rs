//! Serde Integration for OpenStruct
//!
//! This layer provides typed access to attribute stores via serde. It adds:
//! - `TypedAttributes`: read attributes into Rust types, write Rust types
//!   as attributes, export a store as JSON
//! - `seed_from`: build a store whose baseline is a serialized value
//! - Value <-> serde conversions
//!
//! # Example
//!
//! ```rust
//! use openstruct_core::TrackedStruct;
//! use openstruct_serde::{seed_from, TypedAttributes};
//!
//! let mut config: TrackedStruct =
//!     seed_from(&serde_json::json!({"debug": false, "port": 8080})).unwrap();
//! config.set("debug", true);
//!
//! assert!(config.dirty());
//! assert_eq!(config.get_as::<bool>("debug").unwrap(), Some(true));
//! ```

mod convert;
mod typed;

pub use convert::{from_value, json_to_value, to_value, value_to_json};
pub use typed::{seed_from, TypedAttributes};

// Re-export core types for convenience
pub use openstruct_core::{AttributeStore, Error, Key, OpenStruct, TrackedStruct, Value};

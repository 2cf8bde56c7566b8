//! OpenStruct: structs whose attributes are assigned at runtime.
//!
//! Nested maps are wrapped into nested structs as they are assigned, lists
//! keep their order, and `TrackedStruct` remembers which attributes changed
//! since construction.
//!
//! The `serde` feature (on by default) adds typed access and JSON export
//! through [`TypedAttributes`].

pub use openstruct_core::*;

#[cfg(feature = "serde")]
pub use openstruct_serde::{
    from_value, json_to_value, seed_from, to_value, value_to_json, TypedAttributes,
};

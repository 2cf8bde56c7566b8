//! Attribute paths: named access to nested attributes.
//!
//! `AttrPath` is the dotted form `user.address.city`. Every component is
//! turned into a [`Key`] and handed to the store's indexed operations, so
//! named access and indexed access can never disagree.

use std::fmt;

use crate::key::{is_identifier, Key};

/// Errors related to attribute path parsing and validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// A path component is not a valid identifier or index.
    InvalidComponent {
        component: String,
        position: usize,
        message: String,
    },
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::InvalidComponent {
                component,
                position,
                message,
            } => {
                write!(
                    f,
                    "invalid path component '{}' at position {}: {}",
                    component, position, message
                )
            }
        }
    }
}

impl std::error::Error for PathError {}

/// A validated attribute path.
///
/// Components must be valid Unicode identifiers (per UAX#31) or numeric
/// strings (for list indexing). Keys that are neither can only be reached
/// with indexed access (`get(key)`).
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct AttrPath {
    components: Vec<Key>,
}

impl AttrPath {
    /// Parse a dotted path string, validating components.
    ///
    /// # Path Syntax
    ///
    /// - Components are separated by `.`
    /// - Empty components are ignored (normalizes `..` and a trailing `.`)
    /// - Each component must be a valid identifier or a list index written
    ///   without leading zeros
    ///
    /// # Examples
    ///
    /// ```rust
    /// use openstruct_core::AttrPath;
    ///
    /// let path = AttrPath::parse("users.0.name").unwrap();
    /// assert_eq!(path.len(), 3);
    ///
    /// assert_eq!(AttrPath::parse("foo.bar.").unwrap(), AttrPath::parse("foo.bar").unwrap());
    /// assert!(AttrPath::parse("first-name").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, PathError> {
        let mut components = Vec::new();
        for (i, component) in s.split('.').filter(|c| !c.is_empty()).enumerate() {
            Self::validate_component(component, i)?;
            components.push(Key::parse(component));
        }
        Ok(AttrPath { components })
    }

    /// Try to create a path from keys, validating each.
    pub fn try_from_keys(keys: Vec<Key>) -> Result<Self, PathError> {
        for (i, key) in keys.iter().enumerate() {
            if !key.is_identifier() {
                return Err(PathError::InvalidComponent {
                    component: key.to_string(),
                    position: i,
                    message: "not reachable by name; use indexed access".to_string(),
                });
            }
        }
        Ok(AttrPath { components: keys })
    }

    fn validate_component(component: &str, position: usize) -> Result<(), PathError> {
        if component.chars().all(|c| c.is_ascii_digit()) {
            // "007" would stay a string key and never reach a list element
            if Key::parse(component).as_int().is_none() {
                return Err(PathError::InvalidComponent {
                    component: component.to_string(),
                    position,
                    message: "list index must be a canonical integer".to_string(),
                });
            }
            return Ok(());
        }

        if !is_identifier(component) {
            return Err(PathError::InvalidComponent {
                component: component.to_string(),
                position,
                message: "must be an identifier or a list index".to_string(),
            });
        }

        Ok(())
    }

    /// Check if this path is empty (refers to the struct itself).
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Get the number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Iterate over the components as keys.
    pub fn keys(&self) -> impl Iterator<Item = Key> + '_ {
        self.components.iter().cloned()
    }

    /// Split into the parent path and the final key.
    ///
    /// Returns `None` for the empty path.
    pub fn split_last(&self) -> Option<(AttrPath, &Key)> {
        let (last, parent) = self.components.split_last()?;
        Some((
            AttrPath {
                components: parent.to_vec(),
            },
            last,
        ))
    }

    /// Join this path with another.
    #[must_use]
    pub fn join(&self, other: &AttrPath) -> AttrPath {
        let mut components = self.components.clone();
        components.extend(other.components.iter().cloned());
        AttrPath { components }
    }
}

impl fmt::Display for AttrPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, key) in self.components.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", key)?;
        }
        Ok(())
    }
}

impl std::ops::Index<usize> for AttrPath {
    type Output = Key;

    fn index(&self, i: usize) -> &Self::Output {
        &self.components[i]
    }
}

impl std::str::FromStr for AttrPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AttrPath::parse(s)
    }
}

/// Macro for creating attribute paths from literals.
///
/// # Example
///
/// ```rust
/// use openstruct_core::attr_path;
///
/// let p = attr_path!("users.0.name");
/// assert_eq!(p.len(), 3);
/// ```
#[macro_export]
macro_rules! attr_path {
    ($s:expr) => {
        $crate::AttrPath::parse($s).expect("invalid attribute path literal")
    };
}

//! Attribute keys.

use std::fmt;

/// The key of an attribute: a string or an integer.
///
/// Text that spells a canonical decimal integer (`"0"`, `"42"`, `"-3"`) is
/// normalized to [`Key::Int`], so `Key::from("1") == Key::from(1)`. This keeps
/// maps seeded with stringly-typed indices classified as lists.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Key {
    /// Integer key (list index or numeric map key).
    Int(i64),
    /// Any other key.
    Str(String),
}

impl Key {
    /// Build a key from text, normalizing canonical integers.
    pub fn parse(s: &str) -> Self {
        match canonical_int(s) {
            Some(i) => Key::Int(i),
            None => Key::Str(s.to_string()),
        }
    }

    /// The integer value, if this is an integer key.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Key::Int(i) => Some(*i),
            Key::Str(_) => None,
        }
    }

    /// The string value, if this is a string key.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Key::Str(s) => Some(s),
            Key::Int(_) => None,
        }
    }

    /// Whether named (dotted-path) access can reach this key.
    ///
    /// Integer keys and Unicode identifiers qualify. Anything else
    /// (`"first-name"`, `"a b"`) is only reachable through indexed access.
    pub fn is_identifier(&self) -> bool {
        match self {
            Key::Int(i) => *i >= 0,
            Key::Str(s) => is_identifier(s),
        }
    }
}

/// `s` is a valid UAX#31 identifier, allowing a leading underscore.
pub(crate) fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    let valid_start = unicode_ident::is_xid_start(first)
        || (first == '_'
            && chars
                .clone()
                .next()
                .is_some_and(unicode_ident::is_xid_continue));

    valid_start && chars.all(unicode_ident::is_xid_continue)
}

fn canonical_int(s: &str) -> Option<i64> {
    let digits = s.strip_prefix('-').unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // "007" and "-0" stay strings
    if (digits.len() > 1 && digits.starts_with('0')) || s == "-0" {
        return None;
    }
    s.parse().ok()
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(i) => write!(f, "{}", i),
            Key::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::parse(s)
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        match canonical_int(&s) {
            Some(i) => Key::Int(i),
            None => Key::Str(s),
        }
    }
}

impl From<&String> for Key {
    fn from(s: &String) -> Self {
        Key::parse(s)
    }
}

impl From<&Key> for Key {
    fn from(k: &Key) -> Self {
        k.clone()
    }
}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Key::Int(i)
    }
}

impl From<i32> for Key {
    fn from(i: i32) -> Self {
        Key::Int(i as i64)
    }
}

impl From<usize> for Key {
    fn from(i: usize) -> Self {
        Key::Int(i as i64)
    }
}

//! Error types for the core layer.

use thiserror::Error;

/// Errors raised by the core layer.
///
/// Ordinary misuse of a struct (reading or deleting a missing key) is not an
/// error, and malformed attribute paths are reported by
/// [`PathError`](crate::PathError) at parse time. What remains are failures
/// raised by deferred computations, which surface to the caller unchanged,
/// and serde conversion failures.
#[derive(Debug, Error)]
pub enum Error {
    /// A value could not be decoded into the requested shape.
    #[error("decode error: {message}")]
    Decode { message: String },

    /// A value could not be encoded.
    #[error("encode error: {message}")]
    Encode { message: String },

    /// Wrapped error from caller code (typically a deferred computation).
    #[error("{0}")]
    Custom(Box<dyn std::error::Error>),

    /// Generic error with message.
    #[error("{message}")]
    Other { message: String },
}

impl Error {
    /// Create an error carrying only a message.
    pub fn other(message: impl Into<String>) -> Self {
        Error::Other {
            message: message.into(),
        }
    }

    /// Wrap an arbitrary error.
    pub fn custom(error: impl std::error::Error + 'static) -> Self {
        Error::Custom(Box::new(error))
    }

    /// Create a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Error::Decode {
            message: message.into(),
        }
    }

    /// Create an encode error.
    pub fn encode(message: impl Into<String>) -> Self {
        Error::Encode {
            message: message.into(),
        }
    }
}

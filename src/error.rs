//! Error types for patch operations.

use thiserror::Error;

/// Result type alias for patch operations.
pub type PatchResult<T> = Result<T, PatchError>;

/// Boxed cause preserved from an external codec failure.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while patching a record.
#[derive(Debug, Error)]
pub enum PatchError {
    /// The key path fails the grammar, or a component addresses a value
    /// of the wrong shape (e.g. a key into a scalar).
    #[error("invalid key path: {path}")]
    InvalidKeyPath {
        /// The offending key path, verbatim as supplied by the caller.
        path: String,
    },

    /// An index component addresses more than one past the array's length.
    #[error("index {index} out of bounds at path {path}")]
    IndexOutOfBounds {
        /// The key path containing the offending index.
        path: String,
        /// The index that was addressed.
        index: usize,
    },

    /// The top-level value is not an object.
    #[error("root value must be an object")]
    InvalidRootObject,

    /// The codec failed to encode the record into a document.
    #[error("encoding failed: {source}")]
    EncodingFailed {
        /// The underlying codec error.
        source: BoxError,
    },

    /// The codec failed to decode the patched document back into the record.
    #[error("decoding failed: {source}")]
    DecodingFailed {
        /// The underlying codec error.
        source: BoxError,
    },

    /// Structural JSON parse/serialize failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PatchError {
    /// Create an invalid key path error.
    #[inline]
    pub fn invalid_key_path(path: impl Into<String>) -> Self {
        PatchError::InvalidKeyPath { path: path.into() }
    }

    /// Create an index out of bounds error.
    #[inline]
    pub fn index_out_of_bounds(path: impl Into<String>, index: usize) -> Self {
        PatchError::IndexOutOfBounds {
            path: path.into(),
            index,
        }
    }

    /// Create an encoding failure wrapping a codec error.
    #[inline]
    pub fn encoding(source: impl Into<BoxError>) -> Self {
        PatchError::EncodingFailed {
            source: source.into(),
        }
    }

    /// Create a decoding failure wrapping a codec error.
    #[inline]
    pub fn decoding(source: impl Into<BoxError>) -> Self {
        PatchError::DecodingFailed {
            source: source.into(),
        }
    }
}

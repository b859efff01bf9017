//! Record ↔ document conversion.
//!
//! The patching core never talks to a concrete serializer directly: it
//! encodes the record into a [`serde_json::Value`] document through a
//! [`Codec`] and decodes the patched document back through the same codec.
//! This keeps the engine testable with a trivial in-memory codec and lets
//! callers supply their own encoding strategies (date formats, field
//! renaming, and so on) without the core interpreting them.

use crate::error::{PatchError, PatchResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Converts typed records to and from the generic document tree.
pub trait Codec {
    /// Encode a record into a document.
    fn encode<T: Serialize>(&self, record: &T) -> PatchResult<Value>;

    /// Decode a document back into a record.
    fn decode<T: DeserializeOwned>(&self, document: Value) -> PatchResult<T>;
}

/// The default codec, backed by `serde_json`'s value conversion.
///
/// # Examples
///
/// ```
/// use keypatch::{Codec, JsonCodec};
/// use serde_json::json;
///
/// let codec = JsonCodec;
/// let doc = codec.encode(&vec![1, 2]).unwrap();
/// assert_eq!(doc, json!([1, 2]));
///
/// let back: Vec<i32> = codec.decode(doc).unwrap();
/// assert_eq!(back, vec![1, 2]);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct JsonCodec;

impl JsonCodec {
    /// Create the default codec.
    #[inline]
    pub fn new() -> Self {
        JsonCodec
    }
}

impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, record: &T) -> PatchResult<Value> {
        serde_json::to_value(record).map_err(|err| PatchError::encoding(err))
    }

    fn decode<T: DeserializeOwned>(&self, document: Value) -> PatchResult<T> {
        serde_json::from_value(document).map_err(|err| PatchError::decoding(err))
    }
}

//! Patch sets and the record patching entry points.
//!
//! A [`PatchSet`] maps key path strings to replacement values. The entry
//! points in this module fold a patch set over the encoded form of a typed
//! record: encode, apply every edit against the accumulating document, then
//! decode. The whole call is all-or-nothing — the first failing edit aborts
//! it and nothing of the partially patched document escapes.

use crate::apply::reconcile;
use crate::codec::{Codec, JsonCodec};
use crate::error::{PatchError, PatchResult};
use crate::path::KeyPath;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A mapping of key path strings to replacement values.
///
/// Keys are unique, so two entries can never target the same literal path
/// within one call; entries targeting overlapping ancestry (`a.b` and
/// `a.c`) compose because edits are folded sequentially.
///
/// # Examples
///
/// ```
/// use keypatch::PatchSet;
///
/// let patches = PatchSet::new()
///     .with("name", "Jamie")
///     .with("profile.address.city", "San Francisco")
///     .with("tags[0]", "swift");
///
/// assert_eq!(patches.len(), 3);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatchSet(Map<String, Value>);

impl PatchSet {
    /// Create an empty patch set.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry to this patch set (builder pattern).
    #[inline]
    pub fn with(mut self, path: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(path.into(), value.into());
        self
    }

    /// Insert an entry, returning the previous value for that path if any.
    #[inline]
    pub fn insert(&mut self, path: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(path.into(), value.into())
    }

    /// Remove an entry by path.
    #[inline]
    pub fn remove(&mut self, path: &str) -> Option<Value> {
        self.0.remove(path)
    }

    /// Get the replacement value for a path, if present.
    #[inline]
    pub fn get(&self, path: &str) -> Option<&Value> {
        self.0.get(path)
    }

    /// Check if this patch set is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of entries in this patch set.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over the `(path, value)` entries.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

impl From<Map<String, Value>> for PatchSet {
    fn from(map: Map<String, Value>) -> Self {
        PatchSet(map)
    }
}

impl FromIterator<(String, Value)> for PatchSet {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        PatchSet(iter.into_iter().collect())
    }
}

impl IntoIterator for PatchSet {
    type Item = (String, Value);
    type IntoIter = serde_json::map::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Extend<(String, Value)> for PatchSet {
    fn extend<I: IntoIterator<Item = (String, Value)>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

/// Apply a patch set to a record, producing a new record.
///
/// Uses the default [`JsonCodec`]; see [`patch_with`] to supply a custom
/// codec.
///
/// # Examples
///
/// ```
/// use keypatch::{patch, PatchSet};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Serialize, Deserialize)]
/// struct User {
///     name: String,
///     age: u32,
/// }
///
/// let user = User { name: "Taylor".into(), age: 30 };
/// let updated = patch(&user, &PatchSet::new().with("age", 31)).unwrap();
/// assert_eq!(updated.age, 31);
/// assert_eq!(updated.name, "Taylor");
/// ```
pub fn patch<T>(record: &T, patches: &PatchSet) -> PatchResult<T>
where
    T: Serialize + DeserializeOwned,
{
    patch_with(record, patches, &JsonCodec)
}

/// Apply a patch set to a record through a caller-supplied codec.
pub fn patch_with<T, C>(record: &T, patches: &PatchSet, codec: &C) -> PatchResult<T>
where
    T: Serialize + DeserializeOwned,
    C: Codec,
{
    let document = patched_document(record, patches, codec)?;
    codec.decode(document)
}

/// Apply a patch set to a record in place.
///
/// The record is replaced only when the whole patch set applies cleanly;
/// on any failure it is left untouched.
pub fn patch_in_place<T>(record: &mut T, patches: &PatchSet) -> PatchResult<()>
where
    T: Serialize + DeserializeOwned,
{
    patch_in_place_with(record, patches, &JsonCodec)
}

/// Apply a patch set to a record in place through a caller-supplied codec.
pub fn patch_in_place_with<T, C>(record: &mut T, patches: &PatchSet, codec: &C) -> PatchResult<()>
where
    T: Serialize + DeserializeOwned,
    C: Codec,
{
    *record = patch_with(&*record, patches, codec)?;
    Ok(())
}

/// Apply a JSON-encoded patch payload to a record.
///
/// The payload must parse as a JSON object whose keys are key path strings;
/// a non-object root fails with [`PatchError::InvalidRootObject`] and
/// malformed JSON with [`PatchError::Serialization`].
pub fn patch_json_bytes<T>(record: &T, payload: &[u8]) -> PatchResult<T>
where
    T: Serialize + DeserializeOwned,
{
    patch_json_bytes_with(record, payload, &JsonCodec)
}

/// Apply a JSON-encoded patch payload through a caller-supplied codec.
pub fn patch_json_bytes_with<T, C>(record: &T, payload: &[u8], codec: &C) -> PatchResult<T>
where
    T: Serialize + DeserializeOwned,
    C: Codec,
{
    let patches = parse_patch_payload(serde_json::from_slice(payload)?)?;
    patch_with(record, &patches, codec)
}

/// Apply a JSON-encoded patch string to a record.
///
/// # Examples
///
/// ```
/// use keypatch::patch_json_str;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Serialize, Deserialize)]
/// struct User {
///     name: String,
/// }
///
/// let user = User { name: "Taylor".into() };
/// let updated = patch_json_str(&user, r#"{"name": "Jamie"}"#).unwrap();
/// assert_eq!(updated.name, "Jamie");
/// ```
pub fn patch_json_str<T>(record: &T, payload: &str) -> PatchResult<T>
where
    T: Serialize + DeserializeOwned,
{
    patch_json_str_with(record, payload, &JsonCodec)
}

/// Apply a JSON-encoded patch string through a caller-supplied codec.
pub fn patch_json_str_with<T, C>(record: &T, payload: &str, codec: &C) -> PatchResult<T>
where
    T: Serialize + DeserializeOwned,
    C: Codec,
{
    let patches = parse_patch_payload(serde_json::from_str(payload)?)?;
    patch_with(record, &patches, codec)
}

/// Encode the record and fold every edit over the accumulating document.
fn patched_document<T, C>(record: &T, patches: &PatchSet, codec: &C) -> PatchResult<Value>
where
    T: Serialize,
    C: Codec,
{
    let document = codec.encode(record)?;
    if !document.is_object() {
        return Err(PatchError::InvalidRootObject);
    }
    patches.iter().try_fold(document, |doc, (path, value)| {
        let key_path = KeyPath::parse(path)?;
        reconcile(value.clone(), Some(&doc), key_path.segments(), path)
    })
}

/// Interpret a parsed JSON payload as a patch set; the root must be an object.
fn parse_patch_payload(payload: Value) -> PatchResult<PatchSet> {
    match payload {
        Value::Object(map) => Ok(PatchSet(map)),
        _ => Err(PatchError::InvalidRootObject),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_patch_set_builder() {
        let patches = PatchSet::new().with("a", 1).with("b", "two");
        assert_eq!(patches.len(), 2);
        assert_eq!(patches.get("a"), Some(&json!(1)));
        assert_eq!(patches.get("b"), Some(&json!("two")));
    }

    #[test]
    fn test_patch_set_last_insert_wins() {
        let mut patches = PatchSet::new();
        assert_eq!(patches.insert("x", 1), None);
        assert_eq!(patches.insert("x", 2), Some(json!(1)));
        assert_eq!(patches.len(), 1);
    }

    #[test]
    fn test_patch_set_serde() {
        let patches = PatchSet::new().with("name", "test").with("tags[0]", "a");
        let text = serde_json::to_string(&patches).unwrap();
        let parsed: PatchSet = serde_json::from_str(&text).unwrap();
        assert_eq!(patches, parsed);
    }

    #[test]
    fn test_payload_root_must_be_object() {
        assert!(matches!(
            parse_patch_payload(json!([1, 2])),
            Err(PatchError::InvalidRootObject)
        ));
        assert!(matches!(
            parse_patch_payload(json!("name")),
            Err(PatchError::InvalidRootObject)
        ));
        assert!(parse_patch_payload(json!({"a": 1})).is_ok());
    }

    #[test]
    fn test_non_object_record_rejected() {
        let result = patch(&42i64, &PatchSet::new().with("a", 1));
        assert!(matches!(result, Err(PatchError::InvalidRootObject)));
    }
}

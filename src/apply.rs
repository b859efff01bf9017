//! Patch reconciliation over JSON documents.
//!
//! This module contains the pure reconciliation engine that applies a single
//! path/value edit to a JSON document and returns a new document. The input
//! document is never mutated; each recursion level rebuilds the container it
//! touches.

use crate::error::{PatchError, PatchResult};
use crate::path::{KeyPath, Segment};
use serde_json::{Map, Value};

/// Apply a single path/value edit to a document (pure function).
///
/// Missing intermediate objects and arrays are created on the fly. Arrays
/// may grow by at most one slot per edit (an append at `index == len`);
/// addressing further past the end fails with
/// [`PatchError::IndexOutOfBounds`]. Addressing into an existing scalar
/// fails with [`PatchError::InvalidKeyPath`].
///
/// # Examples
///
/// ```
/// use keypatch::apply_edit;
/// use serde_json::json;
///
/// let doc = json!({"tags": ["swift"]});
/// let next = apply_edit(&doc, "tags[1]", json!("ios")).unwrap();
/// assert_eq!(next["tags"], json!(["swift", "ios"]));
///
/// // Original is unchanged (pure function)
/// assert_eq!(doc["tags"], json!(["swift"]));
/// ```
pub fn apply_edit(doc: &Value, path: &str, value: Value) -> PatchResult<Value> {
    let key_path = KeyPath::parse(path)?;
    reconcile(value, Some(doc), key_path.segments(), path)
}

/// Recursively reconcile a replacement value into a document node.
///
/// `existing` is the current node at this point in the tree, or `None` when
/// the edit is descending into a container slot that does not exist yet.
/// `key_path` is the full original path string, carried for error reporting.
pub(crate) fn reconcile(
    replacement: Value,
    existing: Option<&Value>,
    segments: &[Segment],
    key_path: &str,
) -> PatchResult<Value> {
    match segments {
        [] => Ok(sanitize(replacement, existing)),
        [Segment::Key(key), rest @ ..] => {
            // Absent or null nodes become implicit empty objects.
            let mut object = match existing {
                None | Some(Value::Null) => Map::new(),
                Some(Value::Object(map)) => map.clone(),
                Some(_) => return Err(PatchError::invalid_key_path(key_path)),
            };
            let child = reconcile(replacement, object.get(key.as_str()), rest, key_path)?;
            object.insert(key.clone(), child);
            Ok(Value::Object(object))
        }
        [Segment::Index(index), rest @ ..] => {
            // Absent or null nodes become implicit empty arrays.
            let mut array = match existing {
                None | Some(Value::Null) => Vec::new(),
                Some(Value::Array(items)) => items.clone(),
                Some(_) => return Err(PatchError::invalid_key_path(key_path)),
            };
            let len = array.len();
            if *index > len {
                // Arrays grow by at most one slot per edit.
                return Err(PatchError::index_out_of_bounds(key_path, *index));
            }
            if *index == len {
                let element = reconcile(replacement, None, rest, key_path)?;
                array.push(element);
            } else {
                let element = reconcile(replacement, Some(&array[*index]), rest, key_path)?;
                array[*index] = element;
            }
            Ok(Value::Array(array))
        }
    }
}

/// Coerce a replacement value against the value it overwrites.
///
/// When the existing value is a string and the replacement is neither a
/// string nor null, the replacement is stored as its compact JSON text.
/// Null is never coerced: it always lands verbatim, so downstream decoding
/// reads it as a cleared field.
fn sanitize(replacement: Value, existing: Option<&Value>) -> Value {
    match (existing, &replacement) {
        (Some(Value::String(_)), Value::String(_) | Value::Null) => replacement,
        (Some(Value::String(_)), _) => Value::String(replacement.to_string()),
        _ => replacement,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_existing_field() {
        let doc = json!({"name": "Taylor", "id": 42});
        let result = apply_edit(&doc, "name", json!("Jamie")).unwrap();
        assert_eq!(result["name"], "Jamie");
        assert_eq!(result["id"], 42);
    }

    #[test]
    fn test_set_creates_intermediate_objects() {
        let doc = json!({});
        let result = apply_edit(&doc, "a.b.c", json!(42)).unwrap();
        assert_eq!(result, json!({"a": {"b": {"c": 42}}}));
    }

    #[test]
    fn test_set_through_null_creates_object() {
        let doc = json!({"a": null});
        let result = apply_edit(&doc, "a.b", json!(1)).unwrap();
        assert_eq!(result, json!({"a": {"b": 1}}));
    }

    #[test]
    fn test_set_creates_array() {
        let doc = json!({});
        let result = apply_edit(&doc, "list[0]", json!("first")).unwrap();
        assert_eq!(result, json!({"list": ["first"]}));
    }

    #[test]
    fn test_set_nested_under_new_array_element() {
        let doc = json!({});
        let result = apply_edit(&doc, "list[0].name", json!("a")).unwrap();
        assert_eq!(result, json!({"list": [{"name": "a"}]}));
    }

    #[test]
    fn test_array_replace_in_range() {
        let doc = json!({"tags": ["swift", "ios"]});
        let result = apply_edit(&doc, "tags[1]", json!("platforms")).unwrap();
        assert_eq!(result["tags"], json!(["swift", "platforms"]));
    }

    #[test]
    fn test_array_append_at_len() {
        let doc = json!({"tags": ["swift", "ios"]});
        let result = apply_edit(&doc, "tags[2]", json!("server")).unwrap();
        assert_eq!(result["tags"], json!(["swift", "ios", "server"]));
    }

    #[test]
    fn test_array_index_past_len_fails() {
        let doc = json!({"tags": ["swift", "ios"]});
        let err = apply_edit(&doc, "tags[5]", json!("backend")).unwrap_err();
        match err {
            PatchError::IndexOutOfBounds { path, index } => {
                assert_eq!(path, "tags[5]");
                assert_eq!(index, 5);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_key_into_scalar_fails() {
        let doc = json!({"age": 35});
        let err = apply_edit(&doc, "age.years", json!(1)).unwrap_err();
        match err {
            PatchError::InvalidKeyPath { path } => assert_eq!(path, "age.years"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_index_into_object_fails() {
        let doc = json!({"profile": {"city": "x"}});
        let err = apply_edit(&doc, "profile[0]", json!(1)).unwrap_err();
        assert!(matches!(err, PatchError::InvalidKeyPath { .. }));
    }

    #[test]
    fn test_string_coercion_on_string_target() {
        let doc = json!({"name": "Taylor"});
        let result = apply_edit(&doc, "name", json!(42)).unwrap();
        assert_eq!(result["name"], "42");

        let result = apply_edit(&doc, "name", json!(true)).unwrap();
        assert_eq!(result["name"], "true");

        let result = apply_edit(&doc, "name", json!([1, 2])).unwrap();
        assert_eq!(result["name"], "[1,2]");
    }

    #[test]
    fn test_null_never_coerced() {
        let doc = json!({"name": "Taylor", "id": 42});
        let result = apply_edit(&doc, "name", json!(null)).unwrap();
        assert_eq!(result["name"], json!(null));

        let result = apply_edit(&doc, "id", json!(null)).unwrap();
        assert_eq!(result["id"], json!(null));
    }

    #[test]
    fn test_no_coercion_on_non_string_target() {
        let doc = json!({"id": 42});
        let result = apply_edit(&doc, "id", json!("seven")).unwrap();
        assert_eq!(result["id"], "seven");
    }

    #[test]
    fn test_apply_is_pure() {
        let doc = json!({"profile": {"city": "Cupertino"}, "tags": ["a"]});
        let _ = apply_edit(&doc, "profile.city", json!("SF")).unwrap();
        let _ = apply_edit(&doc, "tags[1]", json!("b")).unwrap();
        assert_eq!(
            doc,
            json!({"profile": {"city": "Cupertino"}, "tags": ["a"]})
        );
    }

    #[test]
    fn test_sibling_fields_survive() {
        let doc = json!({"address": {"street": "1 Infinite Loop", "city": "Cupertino"}});
        let result = apply_edit(&doc, "address.city", json!("San Francisco")).unwrap();
        assert_eq!(result["address"]["street"], "1 Infinite Loop");
        assert_eq!(result["address"]["city"], "San Francisco");
    }
}

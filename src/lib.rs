//! Path-addressed partial updates for serde records.
//!
//! `keypatch` applies a sparse set of field-level edits — addressed by
//! dotted/bracketed key path strings such as `profile.address.city` or
//! `tags[0]` — to any `Serialize + DeserializeOwned` record, without
//! per-field update code. Edits arrive as a flat `path -> value` map or as
//! a raw JSON payload, as one would receive from a PATCH-style API.
//!
//! # How it works
//!
//! ```text
//! record --encode--> document --N× (parse path, reconcile)--> document' --decode--> record'
//! ```
//!
//! - The record is encoded into a generic JSON document through a [`Codec`]
//!   (by default [`JsonCodec`], i.e. `serde_json`).
//! - Each edit is parsed into a [`KeyPath`] and reconciled into the
//!   document: missing intermediate containers are created, arrays may grow
//!   by one slot per edit, and writing into an existing scalar is an error.
//! - The patched document is decoded back into the record type, so type
//!   validation happens implicitly at the decode step.
//!
//! Every call is all-or-nothing: the first failing edit aborts it, and the
//! caller's record is never partially mutated. All tree reconstruction is
//! copy-on-write, so the same record can be patched concurrently from
//! independent threads.
//!
//! # Quick Start
//!
//! ```
//! use keypatch::{patch, PatchSet};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Serialize, Deserialize)]
//! struct User {
//!     name: String,
//!     tags: Vec<String>,
//! }
//!
//! let user = User {
//!     name: "Taylor".into(),
//!     tags: vec!["swift".into()],
//! };
//!
//! let patches = PatchSet::new()
//!     .with("name", "Jamie")
//!     .with("tags[1]", "ios"); // index == len appends
//!
//! let updated = patch(&user, &patches).unwrap();
//! assert_eq!(updated.name, "Jamie");
//! assert_eq!(updated.tags, vec!["swift", "ios"]);
//! ```
//!
//! # Patching from raw JSON
//!
//! ```
//! use keypatch::patch_json_str;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Serialize, Deserialize)]
//! struct Profile {
//!     city: String,
//! }
//!
//! let profile = Profile { city: "Cupertino".into() };
//! let updated = patch_json_str(&profile, r#"{"city": "San Francisco"}"#).unwrap();
//! assert_eq!(updated.city, "San Francisco");
//! ```

mod apply;
mod codec;
mod error;
mod patch;
mod path;

pub use apply::apply_edit;
pub use codec::{Codec, JsonCodec};
pub use error::{BoxError, PatchError, PatchResult};
pub use patch::{
    patch, patch_in_place, patch_in_place_with, patch_json_bytes, patch_json_bytes_with,
    patch_json_str, patch_json_str_with, patch_with, PatchSet,
};
pub use path::{KeyPath, Segment};

// Re-export serde_json::Value for convenience
pub use serde_json::Value;

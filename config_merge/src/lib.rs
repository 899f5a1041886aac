//! Deep, semantic merging of layered configuration trees.
//!
//! This crate merges untyped configuration documents (already decoded into
//! [`serde_json::Value`] trees) so that a base configuration can be overlaid
//! by one or more overrides. Mappings merge key by key, sequences are
//! reconciled using per-element identity fields and content fingerprints, and
//! scalars are overwritten only by values of the same kind. Incompatible
//! shapes fail with a [`MergeError`] naming the exact location of the
//! conflict.
//!
//! # Example
//!
//! ```rust
//! use config_merge::merge_all;
//! use serde_json::json;
//!
//! let mut config = json!({
//!     "name": "api",
//!     "servers": [{"id": "web", "port": 80}, {"id": "db", "port": 5432}]
//! });
//! merge_all(&mut config, [
//!     json!({"servers": [{"id": "web", "port": 8080}]}),
//!     json!({"servers": [{"id": "cache", "port": 6379}]}),
//! ])?;
//!
//! assert_eq!(config, json!({
//!     "name": "api",
//!     "servers": [
//!         {"id": "web", "port": 8080},
//!         {"id": "db", "port": 5432},
//!         {"id": "cache", "port": 6379}
//!     ]
//! }));
//! # Ok::<_, config_merge::MergeError>(())
//! ```

mod canonical;
mod error;
mod fingerprint;
mod identity;
pub mod layer;
mod merge;
mod options;
mod path;
mod value;

pub use error::{ComposeError, MergeError, MergeErrorKind};
pub use fingerprint::{Fingerprint, FingerprintCounts};
pub use identity::IdentityKey;
pub use layer::{MergeComposer, MergeLayer, MergeProvenance, from_value};
pub use merge::{Merger, merge, merge_all, merge_at};
pub use options::{DEFAULT_IDENTITY_FIELDS, MergeOptions};
pub use path::{MergePath, PathSegment};
pub use value::ValueKind;

pub use serde_json;

//! Deep merge of tree values.
//!
//! A merge walks the source tree top-down and dispatches on the shape of each
//! source node: mappings merge key by key, sequences are reconciled by
//! identity and content, and everything else is merged as a scalar. A `null`
//! source node is treated as absent and leaves the destination untouched; a
//! `null` destination node is replaced wholesale.
//!
//! The destination is updated in place. When a merge fails, nodes merged
//! before the failure keep their new values; the failing node itself is
//! never half written.

mod dispatch;
mod mapping;
mod scalar;
mod sequence;

use serde_json::Value;
use tracing::debug;

use crate::error::MergeError;
use crate::options::MergeOptions;
use crate::path::Context;

/// Merges tree values according to a set of [`MergeOptions`].
///
/// # Examples
///
/// ```rust
/// use config_merge::{MergeOptions, Merger};
/// use serde_json::json;
///
/// let merger = Merger::new(MergeOptions::id_only());
/// let mut dest = json!([1, 2]);
/// merger.merge(&mut dest, json!([2, 3]))?;
/// assert_eq!(dest, json!([1, 2, 2, 3]));
/// # Ok::<_, config_merge::MergeError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct Merger {
    options: MergeOptions,
}

impl Merger {
    /// Create a merger using `options`.
    #[must_use]
    pub const fn new(options: MergeOptions) -> Self {
        Self { options }
    }

    /// Options used by this merger.
    #[must_use]
    pub const fn options(&self) -> &MergeOptions {
        &self.options
    }

    /// Merge `source` into `destination`.
    ///
    /// # Errors
    ///
    /// Returns a [`MergeError`] when corresponding nodes cannot be merged.
    pub fn merge(&self, destination: &mut Value, source: Value) -> Result<(), MergeError> {
        let ctx = Context::root();
        self.merge_into(&ctx, Some(destination), Some(source))
            .inspect_err(log_failure)
    }

    /// Merge each of `sources` into `destination`, in order.
    ///
    /// Stops at the first source that fails; sources applied before it stay
    /// applied.
    ///
    /// # Errors
    ///
    /// Returns the [`MergeError`] raised by the first failing source.
    pub fn merge_all<I>(&self, destination: &mut Value, sources: I) -> Result<(), MergeError>
    where
        I: IntoIterator<Item = Value>,
    {
        for (index, source) in sources.into_iter().enumerate() {
            debug!(index, "applying merge source");
            self.merge(destination, source)?;
        }
        Ok(())
    }

    /// Merge `source` into the node of `destination` addressed by the JSON
    /// pointer `pointer` (RFC 6901).
    ///
    /// The empty pointer addresses `destination` itself. Error paths are
    /// reported relative to `destination`, starting with the pointer's
    /// tokens.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::InvalidDestination`] when `pointer` does not
    /// address an existing node, or any other [`MergeError`] raised by the
    /// merge itself.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use config_merge::{MergeErrorKind, Merger};
    /// use serde_json::json;
    ///
    /// let merger = Merger::default();
    /// let mut dest = json!({"service": {"env": {"A": "1"}}});
    /// merger.merge_at(&mut dest, "/service/env", json!({"B": "2"}))?;
    /// assert_eq!(dest["service"]["env"], json!({"A": "1", "B": "2"}));
    ///
    /// let err = merger.merge_at(&mut dest, "/missing", json!({})).unwrap_err();
    /// assert_eq!(err.kind(), MergeErrorKind::InvalidDestination);
    /// # Ok::<_, config_merge::MergeError>(())
    /// ```
    pub fn merge_at(
        &self,
        destination: &mut Value,
        pointer: &str,
        source: Value,
    ) -> Result<(), MergeError> {
        let ctx = Context::at_pointer(pointer);
        self.merge_into(&ctx, destination.pointer_mut(pointer), Some(source))
            .inspect_err(log_failure)
    }
}

fn log_failure(err: &MergeError) {
    debug!(path = %err.root_cause().path(), error = %err, "merge failed");
}

/// Merge `source` into `destination` using [`MergeOptions::default`].
///
/// # Errors
///
/// Returns a [`MergeError`] when corresponding nodes cannot be merged.
///
/// # Examples
///
/// ```rust
/// use config_merge::merge;
/// use serde_json::json;
///
/// let mut dest = json!({"a": 1, "list": [1, 2]});
/// merge(&mut dest, json!({"b": 2, "list": [2, 3]}))?;
/// assert_eq!(dest, json!({"a": 1, "b": 2, "list": [1, 2, 3]}));
/// # Ok::<_, config_merge::MergeError>(())
/// ```
pub fn merge(destination: &mut Value, source: Value) -> Result<(), MergeError> {
    Merger::default().merge(destination, source)
}

/// Merge each of `sources` into `destination`, in order, using
/// [`MergeOptions::default`].
///
/// # Errors
///
/// Returns the [`MergeError`] raised by the first failing source.
pub fn merge_all<I>(destination: &mut Value, sources: I) -> Result<(), MergeError>
where
    I: IntoIterator<Item = Value>,
{
    Merger::default().merge_all(destination, sources)
}

/// Merge `source` into the node addressed by `pointer` using
/// [`MergeOptions::default`]. See [`Merger::merge_at`].
///
/// # Errors
///
/// Returns a [`MergeError`] when the pointer does not resolve or the merge
/// fails.
pub fn merge_at(destination: &mut Value, pointer: &str, source: Value) -> Result<(), MergeError> {
    Merger::default().merge_at(destination, pointer, source)
}

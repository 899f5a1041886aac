//! Tunable behaviour of the sequence reconciler.

use serde::{Deserialize, Serialize};

/// Identity fields probed, in order, when none are configured explicitly.
pub const DEFAULT_IDENTITY_FIELDS: [&str; 3] = ["id", "refId", "name"];

/// Options controlling how sequences are reconciled.
///
/// The defaults correlate elements by `id`, `refId` or `name` and drop source
/// elements whose content already appears in the destination. Options
/// deserialise with every field optional, so they can be embedded in a
/// tool's own configuration:
///
/// ```rust
/// use config_merge::MergeOptions;
///
/// let options: MergeOptions =
///     serde_json::from_value(serde_json::json!({"identity_fields": ["key"]}))?;
/// assert_eq!(options.identity_fields(), ["key"]);
/// assert!(options.deduplicate());
/// # Ok::<_, serde_json::Error>(())
/// ```
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct MergeOptions {
    identity_fields: Vec<String>,
    deduplicate: bool,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            identity_fields: DEFAULT_IDENTITY_FIELDS.map(str::to_owned).to_vec(),
            deduplicate: true,
        }
    }
}

impl MergeOptions {
    /// Correlate by `id` only and append every uncorrelated source element.
    #[must_use]
    pub fn id_only() -> Self {
        Self {
            identity_fields: vec!["id".to_owned()],
            deduplicate: false,
        }
    }

    /// Replace the identity field list.
    ///
    /// An empty list disables identity correlation entirely.
    #[must_use]
    pub fn with_identity_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.identity_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Enable or disable fingerprint-based duplicate elimination.
    #[must_use]
    pub const fn with_deduplication(mut self, enabled: bool) -> Self {
        self.deduplicate = enabled;
        self
    }

    /// Identity fields probed, in order.
    #[must_use]
    pub fn identity_fields(&self) -> &[String] {
        &self.identity_fields
    }

    /// Whether duplicate source elements are dropped.
    #[must_use]
    pub const fn deduplicate(&self) -> bool {
        self.deduplicate
    }
}

//! Where a merge layer came from.

use std::fmt;

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::Value;

/// Source category of a layer, listed from lowest to highest conventional
/// precedence.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum MergeProvenance {
    /// Values baked into the application.
    Defaults,
    /// Values read from a configuration file.
    File,
    /// Values collected from environment variables.
    Environment,
    /// Values supplied on the command line.
    Cli,
}

impl fmt::Display for MergeProvenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Defaults => "defaults",
            Self::File => "file",
            Self::Environment => "environment",
            Self::Cli => "CLI",
        })
    }
}

/// A decoded configuration tree tagged with its provenance.
///
/// ```rust
/// use config_merge::{MergeLayer, MergeProvenance};
/// use serde_json::json;
///
/// let layer = MergeLayer::from_file(json!({"port": 8080}), "conf/app.toml");
/// assert_eq!(layer.provenance(), MergeProvenance::File);
/// assert_eq!(layer.path().map(|path| path.as_str()), Some("conf/app.toml"));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct MergeLayer {
    provenance: MergeProvenance,
    value: Value,
    origin: Option<Utf8PathBuf>,
}

impl MergeLayer {
    /// Tag `value` with `provenance`.
    #[must_use]
    pub const fn new(provenance: MergeProvenance, value: Value) -> Self {
        Self {
            provenance,
            value,
            origin: None,
        }
    }

    /// A file layer read from `path`.
    #[must_use]
    pub fn from_file(value: Value, path: impl Into<Utf8PathBuf>) -> Self {
        Self::new(MergeProvenance::File, value).with_path(path)
    }

    /// Record the file the layer was read from.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<Utf8PathBuf>) -> Self {
        self.origin = Some(path.into());
        self
    }

    /// The layer's source category.
    #[must_use]
    pub const fn provenance(&self) -> MergeProvenance {
        self.provenance
    }

    /// The file the layer was read from, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Utf8Path> {
        self.origin.as_deref()
    }

    /// The layer's tree.
    #[must_use]
    pub const fn value(&self) -> &Value {
        &self.value
    }

    pub(super) fn into_parts(self) -> (MergeProvenance, Option<Utf8PathBuf>, Value) {
        (self.provenance, self.origin, self.value)
    }
}

//! Primary error enums for merge and composition flows.

use camino::Utf8Path;
use camino::Utf8PathBuf;
use thiserror::Error;

use crate::identity::IdentityKey;
use crate::layer::MergeProvenance;
use crate::path::MergePath;
use crate::value::ValueKind;

/// Errors raised while merging one tree into another.
///
/// Every variant records the [`MergePath`] at which it was raised. Failures
/// below a mapping key or an identity-correlated sequence element are wrapped
/// by their parent, so the outermost error names the first step of the path
/// and [`MergeError::root_cause`] yields the innermost failure with the full
/// path.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MergeError {
    /// The destination slot is missing or cannot be written.
    #[error("invalid destination at '{path}': {reason}")]
    InvalidDestination {
        /// Location of the destination slot.
        path: MergePath,
        /// Why the slot was rejected.
        reason: String,
    },

    /// Corresponding nodes have incompatible shapes or scalar kinds.
    #[error("type mismatch at '{path}': cannot merge {incoming} into {destination}")]
    TypeMismatch {
        /// Location of the conflicting node.
        path: MergePath,
        /// Kind of the destination node.
        destination: ValueKind,
        /// Kind of the source node.
        incoming: ValueKind,
    },

    /// Merging the value of a mapping key failed.
    #[error("failed to merge object property '{key}': {source}")]
    PropertyMergeFailed {
        /// Location of the property, including `key`.
        path: MergePath,
        /// The mapping key whose values could not be merged.
        key: String,
        /// Failure raised while merging the property's values.
        #[source]
        source: Box<MergeError>,
    },

    /// Merging two identity-correlated sequence elements failed.
    #[error("failed to merge sequence element {identity}: {source}")]
    SequenceMergeFailed {
        /// Location of the element, including its identity.
        path: MergePath,
        /// Identity shared by the destination and source elements.
        identity: IdentityKey,
        /// Failure raised while merging the elements.
        #[source]
        source: Box<MergeError>,
    },

    /// A sequence element could not be canonically encoded for identity or
    /// fingerprint computation.
    #[error("failed to fingerprint sequence element at '{path}': {source}")]
    Fingerprint {
        /// Location of the sequence holding the element.
        path: MergePath,
        /// Canonicaliser failure.
        #[source]
        source: serde_json::Error,
    },
}

/// Discriminant of a [`MergeError`], convenient for matching on the root
/// cause without destructuring.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum MergeErrorKind {
    /// See [`MergeError::InvalidDestination`].
    InvalidDestination,
    /// See [`MergeError::TypeMismatch`].
    TypeMismatch,
    /// See [`MergeError::PropertyMergeFailed`].
    PropertyMergeFailed,
    /// See [`MergeError::SequenceMergeFailed`].
    SequenceMergeFailed,
    /// See [`MergeError::Fingerprint`].
    Fingerprint,
}

/// Errors raised while folding composed layers into a single configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ComposeError {
    /// A layer could not be merged over the layers before it.
    #[error(
        "failed to merge {provenance} layer {index}{}: {source}",
        layer_origin(.path.as_deref())
    )]
    Layer {
        /// Zero-based position of the failing layer.
        index: usize,
        /// Where the failing layer came from.
        provenance: MergeProvenance,
        /// File backing the failing layer, when known.
        path: Option<Utf8PathBuf>,
        /// The merge failure.
        #[source]
        source: MergeError,
    },

    /// The merged tree does not match the requested configuration type.
    #[error("failed to deserialise merged configuration: {0}")]
    Deserialize(#[from] serde_json::Error),
}

fn layer_origin(path: Option<&Utf8Path>) -> String {
    path.map(|file| format!(" from '{file}'"))
        .unwrap_or_default()
}

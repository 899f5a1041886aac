//! Constructors and inspection helpers for `MergeError`.

use crate::identity::IdentityKey;
use crate::path::{Context, MergePath};
use crate::value::ValueKind;

use super::{MergeError, MergeErrorKind};

impl MergeError {
    pub(crate) fn invalid_destination(ctx: &Context<'_>, reason: impl Into<String>) -> Self {
        Self::InvalidDestination {
            path: ctx.to_path(),
            reason: reason.into(),
        }
    }

    pub(crate) fn type_mismatch(
        ctx: &Context<'_>,
        destination: ValueKind,
        incoming: ValueKind,
    ) -> Self {
        Self::TypeMismatch {
            path: ctx.to_path(),
            destination,
            incoming,
        }
    }

    /// Wrap `source`, raised below `key`; `ctx` already includes `key`.
    pub(crate) fn property(ctx: &Context<'_>, key: &str, source: Self) -> Self {
        Self::PropertyMergeFailed {
            path: ctx.to_path(),
            key: key.to_owned(),
            source: Box::new(source),
        }
    }

    /// Wrap `source`, raised below an identity-correlated element; `ctx`
    /// already includes `identity`.
    pub(crate) fn sequence(ctx: &Context<'_>, identity: &IdentityKey, source: Self) -> Self {
        Self::SequenceMergeFailed {
            path: ctx.to_path(),
            identity: identity.clone(),
            source: Box::new(source),
        }
    }

    pub(crate) fn fingerprint(ctx: &Context<'_>, source: serde_json::Error) -> Self {
        Self::Fingerprint {
            path: ctx.to_path(),
            source,
        }
    }

    /// Location at which this error was raised.
    ///
    /// For wrapping variants this is the path of the property or element
    /// that failed; use [`MergeError::root_cause`] to reach the innermost
    /// location.
    #[must_use]
    pub const fn path(&self) -> &MergePath {
        match self {
            Self::InvalidDestination { path, .. }
            | Self::TypeMismatch { path, .. }
            | Self::PropertyMergeFailed { path, .. }
            | Self::SequenceMergeFailed { path, .. }
            | Self::Fingerprint { path, .. } => path,
        }
    }

    /// Discriminant of this error.
    #[must_use]
    pub const fn kind(&self) -> MergeErrorKind {
        match self {
            Self::InvalidDestination { .. } => MergeErrorKind::InvalidDestination,
            Self::TypeMismatch { .. } => MergeErrorKind::TypeMismatch,
            Self::PropertyMergeFailed { .. } => MergeErrorKind::PropertyMergeFailed,
            Self::SequenceMergeFailed { .. } => MergeErrorKind::SequenceMergeFailed,
            Self::Fingerprint { .. } => MergeErrorKind::Fingerprint,
        }
    }

    /// Innermost error, following property and sequence wrappers.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use config_merge::{MergeErrorKind, merge};
    /// use serde_json::json;
    ///
    /// let mut dest = json!({"a": {"b": "x"}});
    /// let err = merge(&mut dest, json!({"a": {"b": 42}})).unwrap_err();
    /// assert_eq!(err.kind(), MergeErrorKind::PropertyMergeFailed);
    /// assert_eq!(err.root_cause().kind(), MergeErrorKind::TypeMismatch);
    /// assert_eq!(err.root_cause().path().to_string(), "a.b");
    /// ```
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        let mut current = self;
        while let Self::PropertyMergeFailed { source, .. }
        | Self::SequenceMergeFailed { source, .. } = current
        {
            current = source.as_ref();
        }
        current
    }
}

//! Identity- and content-aware reconciliation of two sequences.
//!
//! Reconciliation runs in two passes over the sequences:
//!
//! 1. Every destination element stays in place. The k-th destination element
//!    carrying an identity is merged with the k-th source element carrying
//!    the same identity. Any destination element left unpaired has its
//!    fingerprint recorded.
//! 2. Source elements that were not paired are appended in order, except,
//!    when deduplication is enabled, those whose fingerprint matches an
//!    unconsumed destination fingerprint.
//!
//! Re-merging a sequence into itself is therefore a no-op, no source element
//! is lost, and repeated elements keep the multiplicity they have in the
//! destination.

use serde_json::Value;
use tracing::trace;

use super::Merger;
use crate::error::MergeError;
use crate::fingerprint::{Fingerprint, FingerprintCounts};
use crate::identity::{IdentityIndex, identities};
use crate::path::Context;
use crate::value::ValueKind;

impl Merger {
    pub(super) fn merge_sequence(
        &self,
        ctx: &Context<'_>,
        destination: &mut Value,
        source: Vec<Value>,
    ) -> Result<(), MergeError> {
        let found = ValueKind::of(destination);
        let Value::Array(existing) = destination else {
            return Err(MergeError::type_mismatch(ctx, found, ValueKind::Sequence));
        };

        let fields = self.options().identity_fields();
        let deduplicate = self.options().deduplicate();
        let existing_ids =
            identities(existing, fields).map_err(|err| MergeError::fingerprint(ctx, err))?;
        let mut incoming_index = IdentityIndex::build(
            &identities(&source, fields).map_err(|err| MergeError::fingerprint(ctx, err))?,
        );
        let distinct = incoming_index.len();
        let mut incoming: Vec<Option<Value>> = source.into_iter().map(Some).collect();

        let mut reconciled = 0_usize;
        let mut seen = FingerprintCounts::new();
        for (element, identity) in existing.iter_mut().zip(&existing_ids) {
            let counterpart = identity.as_ref().and_then(|key| {
                let position = incoming_index.claim(key)?;
                let value = incoming.get_mut(position).and_then(Option::take)?;
                Some((key, value))
            });
            if let Some((key, value)) = counterpart {
                let child = ctx.with_identity(key);
                self.merge_into(&child, Some(element), Some(value))
                    .map_err(|err| MergeError::sequence(&child, key, err))?;
                reconciled += 1;
            } else if deduplicate {
                seen.record(fingerprint(ctx, element)?);
            }
        }

        let mut appended = 0_usize;
        let mut duplicates = 0_usize;
        for element in incoming.into_iter().flatten() {
            if deduplicate && seen.consume(&fingerprint(ctx, &element)?) {
                duplicates += 1;
                continue;
            }
            existing.push(element);
            appended += 1;
        }

        trace!(
            path = %ctx.to_path(),
            identities = distinct,
            reconciled,
            duplicates,
            appended,
            "reconciled sequence"
        );
        Ok(())
    }
}

fn fingerprint(ctx: &Context<'_>, element: &Value) -> Result<Fingerprint, MergeError> {
    Fingerprint::of(element).map_err(|err| MergeError::fingerprint(ctx, err))
}

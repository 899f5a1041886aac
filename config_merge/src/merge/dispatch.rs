//! Shape-based dispatch for a single destination slot.

use serde_json::Value;

use super::{Merger, scalar};
use crate::error::MergeError;
use crate::path::Context;

impl Merger {
    /// Merge `source` into the slot `destination`.
    ///
    /// A missing slot is rejected, a missing or `null` source is a no-op, and
    /// a `null` destination is replaced wholesale. Otherwise the source's
    /// shape picks the strategy.
    pub(super) fn merge_into(
        &self,
        ctx: &Context<'_>,
        destination: Option<&mut Value>,
        source: Option<Value>,
    ) -> Result<(), MergeError> {
        let Some(destination) = destination else {
            return Err(MergeError::invalid_destination(
                ctx,
                "the destination must refer to an existing value",
            ));
        };
        let Some(source) = source.filter(|value| !value.is_null()) else {
            return Ok(());
        };
        if destination.is_null() {
            *destination = source;
            return Ok(());
        }

        match source {
            Value::Object(map) => self.merge_mapping(ctx, destination, map),
            Value::Array(items) => self.merge_sequence(ctx, destination, items),
            other @ (Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_)) => {
                scalar::merge_scalar(ctx, destination, other)
            }
        }
    }
}

//! Terminal merge for scalars and cross-shape collisions.

use serde_json::Value;

use crate::error::MergeError;
use crate::path::Context;
use crate::value::ValueKind;

/// Overwrite `destination` with `source` when both have the same kind.
///
/// Equal values are left alone. A destination mapping or sequence never
/// accepts a scalar, so shape collisions surface here as type mismatches.
pub(super) fn merge_scalar(
    ctx: &Context<'_>,
    destination: &mut Value,
    source: Value,
) -> Result<(), MergeError> {
    if *destination == source {
        return Ok(());
    }
    let found = ValueKind::of(destination);
    let incoming = ValueKind::of(&source);
    if found != incoming {
        return Err(MergeError::type_mismatch(ctx, found, incoming));
    }
    *destination = source;
    Ok(())
}

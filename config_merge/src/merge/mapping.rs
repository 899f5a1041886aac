//! Key-wise merge of two mappings.

use serde_json::{Map, Value};

use super::Merger;
use crate::error::MergeError;
use crate::path::Context;
use crate::value::ValueKind;

impl Merger {
    /// Union `source` into the mapping held by `destination`.
    ///
    /// Keys missing from the destination are inserted as-is; shared keys are
    /// merged recursively and failures are wrapped with the key.
    pub(super) fn merge_mapping(
        &self,
        ctx: &Context<'_>,
        destination: &mut Value,
        source: Map<String, Value>,
    ) -> Result<(), MergeError> {
        let found = ValueKind::of(destination);
        let Value::Object(target) = destination else {
            return Err(MergeError::type_mismatch(ctx, found, ValueKind::Mapping));
        };

        for (key, value) in source {
            match target.get_mut(&key) {
                Some(existing) => {
                    let child = ctx.with_key(&key);
                    self.merge_into(&child, Some(existing), Some(value))
                        .map_err(|err| MergeError::property(&child, &key, err))?;
                }
                None => {
                    target.insert(key, value);
                }
            }
        }
        Ok(())
    }
}

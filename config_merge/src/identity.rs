//! Identity keys used to correlate sequence elements across a merge.

use std::collections::{HashMap, VecDeque};
use std::fmt;

use serde_json::Value;

use crate::canonical::to_canonical_string;

/// Canonical encoding of an element's identity value.
///
/// The identity value is encoded as compact JSON with sorted mapping keys and
/// exact numbers, so two identities are equal exactly when their values are
/// equal: 64-bit integers keep every digit, and `1`, `1.0` and `"1"` are
/// three different identities.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct IdentityKey(String);

impl IdentityKey {
    /// Encode `value` as an identity.
    ///
    /// # Errors
    ///
    /// Returns the [`serde_json::Error`] raised when the value cannot be
    /// encoded.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use config_merge::IdentityKey;
    /// use serde_json::json;
    ///
    /// let key = IdentityKey::from_value(&json!("web"))?;
    /// assert_eq!(key.as_str(), "\"web\"");
    /// # Ok::<_, serde_json::Error>(())
    /// ```
    pub fn from_value(value: &Value) -> Result<Self, serde_json::Error> {
        to_canonical_string(value).map(Self)
    }

    /// The canonical JSON text of the identity value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Return the first present, non-null value among `fields` when `element` is
/// a mapping.
pub(crate) fn probe<'v>(element: &'v Value, fields: &[String]) -> Option<&'v Value> {
    let Value::Object(map) = element else {
        return None;
    };
    fields
        .iter()
        .find_map(|field| map.get(field).filter(|candidate| !candidate.is_null()))
}

/// Derive the identity of `element`, if it has one.
pub(crate) fn identity_of(
    element: &Value,
    fields: &[String],
) -> Result<Option<IdentityKey>, serde_json::Error> {
    probe(element, fields)
        .map(IdentityKey::from_value)
        .transpose()
}

/// Identity of each element of `items`, position for position.
pub(crate) fn identities(
    items: &[Value],
    fields: &[String],
) -> Result<Vec<Option<IdentityKey>>, serde_json::Error> {
    items
        .iter()
        .map(|item| identity_of(item, fields))
        .collect()
}

/// Queue of source positions per identity, in sequence order.
///
/// Each lookup hands out the next unclaimed position, so the k-th
/// destination element carrying an identity pairs with the k-th source
/// element carrying it.
#[derive(Debug, Default)]
pub(crate) struct IdentityIndex {
    positions: HashMap<IdentityKey, VecDeque<usize>>,
}

impl IdentityIndex {
    pub(crate) fn build(identities: &[Option<IdentityKey>]) -> Self {
        let mut positions: HashMap<IdentityKey, VecDeque<usize>> =
            HashMap::with_capacity(identities.len());
        for (position, identity) in identities.iter().enumerate() {
            if let Some(key) = identity {
                positions.entry(key.clone()).or_default().push_back(position);
            }
        }
        Self { positions }
    }

    /// Claim the next unpaired position carrying `identity`.
    pub(crate) fn claim(&mut self, identity: &IdentityKey) -> Option<usize> {
        self.positions.get_mut(identity)?.pop_front()
    }

    /// Number of distinct identities indexed.
    pub(crate) fn len(&self) -> usize {
        self.positions.len()
    }
}

#[cfg(test)]
mod tests {
    use anyhow::{Result, ensure};
    use rstest::{fixture, rstest};
    use serde_json::{Value, json};

    use super::{IdentityIndex, IdentityKey, identities, identity_of};

    #[fixture]
    fn fields() -> Vec<String> {
        vec!["id".to_owned(), "refId".to_owned(), "name".to_owned()]
    }

    #[rstest]
    #[case::id(json!({"id": 1, "name": "a"}), Some("1"))]
    #[case::ref_id(json!({"refId": "r", "name": "a"}), Some("\"r\""))]
    #[case::name(json!({"name": "a"}), Some("\"a\""))]
    #[case::null_skipped(json!({"id": null, "name": "a"}), Some("\"a\""))]
    #[case::composite(json!({"id": {"b": 2, "a": 1}}), Some("{\"a\":1,\"b\":2}"))]
    #[case::no_fields(json!({"value": 3}), None)]
    #[case::all_null(json!({"id": null, "refId": null}), None)]
    #[case::scalar(json!(5), None)]
    #[case::sequence(json!([{"id": 1}]), None)]
    fn probes_identity_fields_in_order(
        fields: Vec<String>,
        #[case] element: Value,
        #[case] expected: Option<&str>,
    ) -> Result<()> {
        let identity = identity_of(&element, &fields)?;
        ensure!(
            identity.as_ref().map(IdentityKey::as_str) == expected,
            "expected {expected:?}, got {identity:?}"
        );
        Ok(())
    }

    #[rstest]
    fn numeric_identities_are_exact() -> Result<()> {
        let integer = IdentityKey::from_value(&json!(1))?;
        let float = IdentityKey::from_value(&json!(1.0))?;
        let text = IdentityKey::from_value(&json!("1"))?;
        ensure!(integer != float, "1 and 1.0 must not share an identity");
        ensure!(integer != text, "1 and \"1\" must not share an identity");

        let high = IdentityKey::from_value(&json!(1_234_567_890_123_456_789_u64))?;
        let low = IdentityKey::from_value(&json!(1_234_567_890_123_456_788_u64))?;
        ensure!(high != low, "adjacent 64-bit identities must stay distinct");
        ensure!(high.as_str() == "1234567890123456789", "got {high}");
        Ok(())
    }

    #[rstest]
    fn restricted_field_list_ignores_other_fields() -> Result<()> {
        let only_id = vec!["id".to_owned()];
        ensure!(identity_of(&json!({"name": "a"}), &only_id)?.is_none());
        ensure!(identity_of(&json!({"name": "a"}), &[])?.is_none());
        Ok(())
    }

    #[rstest]
    fn index_hands_out_positions_in_order(fields: Vec<String>) -> Result<()> {
        let items = vec![
            json!({"id": 1, "v": "first"}),
            json!(7),
            json!({"id": 1, "v": "second"}),
            json!({"id": 2}),
        ];
        let keys = identities(&items, &fields)?;
        let mut index = IdentityIndex::build(&keys);
        ensure!(index.len() == 2, "expected two identities, got {}", index.len());

        let one = IdentityKey::from_value(&json!(1))?;
        ensure!(index.claim(&one) == Some(0));
        ensure!(index.claim(&one) == Some(2));
        ensure!(index.claim(&one).is_none(), "both occurrences are claimed");
        ensure!(index.claim(&IdentityKey::from_value(&json!(2))?) == Some(3));
        ensure!(index.claim(&IdentityKey::from_value(&json!(3))?).is_none());
        Ok(())
    }
}

//! Content fingerprints for duplicate detection during sequence reconciliation.
//!
//! A fingerprint is the SHA-256 digest of a value's canonical JSON text:
//! compact, with sorted mapping keys and numbers written exactly. Both
//! encoding and digest are platform independent, so fingerprints are stable
//! across machines and releases. Collisions are treated as impossible.

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::canonical::to_canonical_string;

/// Structural hash of a whole tree value.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Fingerprint `value`.
    ///
    /// Mapping key order does not affect the result.
    ///
    /// # Errors
    ///
    /// Returns the [`serde_json::Error`] raised when the value cannot be
    /// encoded.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use config_merge::Fingerprint;
    /// use serde_json::json;
    ///
    /// let left = Fingerprint::of(&json!({"a": 1, "b": [true]}))?;
    /// let right = Fingerprint::of(&json!({"b": [true], "a": 1}))?;
    /// assert_eq!(left, right);
    /// # Ok::<_, serde_json::Error>(())
    /// ```
    pub fn of(value: &Value) -> Result<Self, serde_json::Error> {
        let canonical = to_canonical_string(value)?;
        let mut hasher = Sha256::new();
        hasher.update(canonical.as_bytes());
        Ok(Self(hasher.finalize().into()))
    }

    /// Raw digest bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hexadecimal rendering of the digest.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Multiset of fingerprints.
///
/// The sequence reconciler records every destination element it keeps
/// unmatched and consumes one occurrence per duplicate source element, so an
/// element repeated `n` times in the destination absorbs at most `n` equal
/// source elements.
#[derive(Clone, Debug, Default)]
pub struct FingerprintCounts {
    counts: HashMap<Fingerprint, usize>,
}

impl FingerprintCounts {
    /// Create an empty multiset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one occurrence of `fingerprint`.
    pub fn record(&mut self, fingerprint: Fingerprint) {
        *self.counts.entry(fingerprint).or_default() += 1;
    }

    /// Remove one occurrence of `fingerprint`, returning whether one was
    /// available.
    pub fn consume(&mut self, fingerprint: &Fingerprint) -> bool {
        match self.counts.get_mut(fingerprint) {
            Some(count) if *count > 0 => {
                *count -= 1;
                true
            }
            _ => false,
        }
    }

    /// Occurrences of `fingerprint` still available.
    #[must_use]
    pub fn remaining(&self, fingerprint: &Fingerprint) -> usize {
        self.counts.get(fingerprint).copied().unwrap_or_default()
    }

    /// Returns `true` when no occurrences remain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.values().all(|count| *count == 0)
    }
}

#[cfg(test)]
mod tests {
    use anyhow::{Result, ensure};
    use rstest::rstest;
    use serde_json::json;

    use super::{Fingerprint, FingerprintCounts};

    #[rstest]
    fn equal_content_shares_fingerprint() -> Result<()> {
        let left = Fingerprint::of(&json!({"id": 1, "tags": ["a", "b"]}))?;
        let right = Fingerprint::of(&json!({"tags": ["a", "b"], "id": 1}))?;
        let reordered = Fingerprint::of(&json!({"id": 1, "tags": ["b", "a"]}))?;
        ensure!(left == right, "mapping key order must not matter");
        ensure!(left != reordered, "sequence order must matter");
        Ok(())
    }

    #[rstest]
    fn large_integers_keep_distinct_fingerprints() -> Result<()> {
        let above = Fingerprint::of(&json!(9_007_199_254_740_993_u64))?;
        let below = Fingerprint::of(&json!(9_007_199_254_740_992_u64))?;
        ensure!(above != below, "integers past 2^53 must not collide");
        ensure!(Fingerprint::of(&json!(1))? != Fingerprint::of(&json!(1.0))?);
        Ok(())
    }

    #[rstest]
    fn hex_rendering_is_sha256_sized() -> Result<()> {
        let fingerprint = Fingerprint::of(&json!("value"))?;
        ensure!(fingerprint.to_hex().len() == 64);
        ensure!(fingerprint.to_string() == fingerprint.to_hex());
        ensure!(fingerprint.as_bytes().len() == 32);
        Ok(())
    }

    #[rstest]
    fn counts_track_multiplicity() -> Result<()> {
        let five = Fingerprint::of(&json!(5))?;
        let six = Fingerprint::of(&json!(6))?;
        let mut counts = FingerprintCounts::new();
        ensure!(counts.is_empty());

        counts.record(five);
        counts.record(five);
        ensure!(counts.remaining(&five) == 2);
        ensure!(counts.consume(&five));
        ensure!(counts.consume(&five));
        ensure!(!counts.consume(&five), "third consume must fail");
        ensure!(!counts.consume(&six), "unrecorded fingerprint must fail");
        ensure!(counts.is_empty());
        Ok(())
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Cryptographic commitment binding a ledger entry's full content.
///
/// A `Commitment` is the BLAKE3 hash of an entry's canonical encoding.
/// Identical entry fields always produce the same commitment, so any
/// retroactive edit to a stored entry is detectable by recomputation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Commitment([u8; 32]);

impl Commitment {
    /// Create a `Commitment` from a pre-computed hash.
    pub fn from_hash(hash: [u8; 32]) -> Self {
        Self(hash)
    }

    /// The sentinel commitment (all zeros). Stands in for the predecessor
    /// of the genesis entry, which has no real predecessor.
    pub const fn sentinel() -> Self {
        Self([0u8; 32])
    }

    /// Returns `true` if this is the sentinel commitment.
    pub fn is_sentinel(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// The raw 32-byte hash.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Hex-encoded string representation.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Short hex representation (first 8 characters).
    pub fn short_hex(&self) -> String {
        hex::encode(&self.0[..4])
    }

    /// Parse from a hex string.
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        if bytes.len() != 32 {
            return Err(TypeError::InvalidLength {
                expected: 32,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Commitment({})", self.short_hex())
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<[u8; 32]> for Commitment {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl From<Commitment> for [u8; 32] {
    fn from(c: Commitment) -> Self {
        c.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_is_all_zeros() {
        let sentinel = Commitment::sentinel();
        assert!(sentinel.is_sentinel());
        assert_eq!(sentinel.as_bytes(), &[0u8; 32]);
    }

    #[test]
    fn non_zero_hash_is_not_sentinel() {
        let c = Commitment::from_hash([7u8; 32]);
        assert!(!c.is_sentinel());
    }

    #[test]
    fn hex_roundtrip() {
        let c = Commitment::from_hash([0xAB; 32]);
        let hex = c.to_hex();
        let parsed = Commitment::from_hex(&hex).unwrap();
        assert_eq!(c, parsed);
    }

    #[test]
    fn from_hex_rejects_wrong_length() {
        let err = Commitment::from_hex("abcd").unwrap_err();
        assert_eq!(
            err,
            TypeError::InvalidLength {
                expected: 32,
                actual: 2
            }
        );
    }

    #[test]
    fn from_hex_rejects_non_hex() {
        let err = Commitment::from_hex("zz").unwrap_err();
        assert!(matches!(err, TypeError::InvalidHex(_)));
    }

    #[test]
    fn display_is_full_hex() {
        let c = Commitment::from_hash([1u8; 32]);
        let display = format!("{c}");
        assert_eq!(display.len(), 64);
        assert_eq!(display, c.to_hex());
    }

    #[test]
    fn short_hex_is_8_chars() {
        let c = Commitment::from_hash([0xFF; 32]);
        assert_eq!(c.short_hex().len(), 8);
    }

    #[test]
    fn serde_roundtrip() {
        let c = Commitment::from_hash([42u8; 32]);
        let json = serde_json::to_string(&c).unwrap();
        let parsed: Commitment = serde_json::from_str(&json).unwrap();
        assert_eq!(c, parsed);
    }
}

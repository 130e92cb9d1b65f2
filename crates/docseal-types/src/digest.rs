use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque content fingerprint of a document.
///
/// Produced by an external digest producer (SHA-256 hex in the reference
/// collaborator) and consumed by the ledger as an identifier. The ledger
/// never interprets the value; it only stores and compares it byte-for-byte.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Digest(String);

impl Digest {
    /// Wrap a digest string produced by a collaborator.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The digest as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the digest, returning the underlying string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Digests are long; keep Debug output readable.
        let head = self.0.get(..8).unwrap_or(&self.0);
        write!(f, "Digest({head}…)")
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Digest {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Digest {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

use std::fmt;

use docseal_crypto::entry_commitment;
use docseal_types::Commitment;

/// Payload of the genesis entry. Fixed marker text, never a real digest.
pub const GENESIS_PAYLOAD: &str = "docseal-genesis";

/// One immutable, hash-linked notarization record.
///
/// Fields are private and there are no setters: an entry cannot change after
/// construction. New entries are created only by [`Ledger`](crate::Ledger),
/// which enforces the chain invariants (index succession, predecessor link)
/// at construction time rather than by caller discipline.
#[derive(Clone, PartialEq)]
pub struct LedgerEntry {
    index: u64,
    created_at: f64,
    payload: String,
    previous_commitment: Commitment,
    commitment: Commitment,
}

impl LedgerEntry {
    /// Create a new entry, computing its commitment from the other fields.
    ///
    /// Crate-internal: only the ledger constructs fresh entries.
    pub(crate) fn create(
        index: u64,
        created_at: f64,
        payload: impl Into<String>,
        previous_commitment: Commitment,
    ) -> Self {
        let payload = payload.into();
        let commitment = entry_commitment(index, created_at, &payload, &previous_commitment);
        Self {
            index,
            created_at,
            payload,
            previous_commitment,
            commitment,
        }
    }

    /// Reconstruct an entry verbatim from durable storage.
    ///
    /// The stored commitment is trusted as-is, not recomputed; detecting
    /// tampering is the job of an explicit [`Ledger::verify`](crate::Ledger::verify)
    /// call, so a corrupted file can be loaded, inspected, and reported on.
    pub fn from_parts(
        index: u64,
        created_at: f64,
        payload: impl Into<String>,
        previous_commitment: Commitment,
        commitment: Commitment,
    ) -> Self {
        Self {
            index,
            created_at,
            payload: payload.into(),
            previous_commitment,
            commitment,
        }
    }

    /// Recompute this entry's commitment from its stored fields.
    pub fn recompute_commitment(&self) -> Commitment {
        entry_commitment(
            self.index,
            self.created_at,
            &self.payload,
            &self.previous_commitment,
        )
    }

    /// Zero-based position in the chain.
    pub fn index(&self) -> u64 {
        self.index
    }

    /// Seconds since UNIX epoch (fractional) at which the entry was created.
    pub fn created_at(&self) -> f64 {
        self.created_at
    }

    /// The notarized digest, or [`GENESIS_PAYLOAD`] for the genesis entry.
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Commitment of the predecessor entry; the sentinel at index 0.
    pub fn previous_commitment(&self) -> &Commitment {
        &self.previous_commitment
    }

    /// This entry's own commitment.
    pub fn commitment(&self) -> &Commitment {
        &self.commitment
    }

    /// Returns `true` if this is the genesis entry.
    pub fn is_genesis(&self) -> bool {
        self.index == 0
    }
}

impl fmt::Debug for LedgerEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LedgerEntry")
            .field("index", &self.index)
            .field("created_at", &self.created_at)
            .field("payload", &self.payload)
            .field("previous_commitment", &self.previous_commitment)
            .field("commitment", &self.commitment)
            .finish()
    }
}

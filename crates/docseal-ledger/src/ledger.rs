use std::time::{SystemTime, UNIX_EPOCH};

use docseal_types::{Commitment, Digest};

use crate::entry::{LedgerEntry, GENESIS_PAYLOAD};
use crate::error::{IntegrityViolation, LedgerError};

/// Descriptive fields of a found entry, returned by payload lookup.
#[derive(Clone, Debug, PartialEq)]
pub struct EntryRef {
    pub index: u64,
    pub created_at: f64,
    pub commitment: Commitment,
}

impl From<&LedgerEntry> for EntryRef {
    fn from(entry: &LedgerEntry) -> Self {
        Self {
            index: entry.index(),
            created_at: entry.created_at(),
            commitment: *entry.commitment(),
        }
    }
}

/// Append-only, hash-linked sequence of notarization records.
///
/// The ledger owns entry creation: external code never constructs fresh
/// entries, so the chain invariants (contiguous indices, predecessor links,
/// monotonic timestamps) hold by construction. The sequence is never empty —
/// a genesis entry is always present — and is mutated only by [`append`].
///
/// Durability is delegated entirely to the persistence adapter; the
/// in-memory ledger is never the system of record.
///
/// [`append`]: Ledger::append
#[derive(Debug)]
pub struct Ledger {
    entries: Vec<LedgerEntry>,
}

impl Ledger {
    /// Create a fresh ledger containing only the genesis entry.
    pub fn genesis() -> Result<Self, LedgerError> {
        let genesis = LedgerEntry::create(0, unix_now()?, GENESIS_PAYLOAD, Commitment::sentinel());
        Ok(Self {
            entries: vec![genesis],
        })
    }

    /// Reconstruct a ledger from persisted entries, trusted verbatim.
    ///
    /// Timestamps and commitments are replayed as stored, not recomputed;
    /// call [`verify`](Ledger::verify) to check integrity explicitly.
    pub fn from_entries(entries: Vec<LedgerEntry>) -> Result<Self, LedgerError> {
        if entries.is_empty() {
            return Err(LedgerError::EmptyChain);
        }
        Ok(Self { entries })
    }

    /// Append a notarized digest, returning the new entry.
    ///
    /// The new entry takes the next index, a timestamp clamped to be no
    /// earlier than its predecessor's, and the predecessor's commitment as
    /// its link. All-or-nothing: if the time source fails, no mutation is
    /// observable. Does not persist — persistence is the caller's
    /// responsibility, so batch callers can save once per batch.
    pub fn append(&mut self, digest: &Digest) -> Result<&LedgerEntry, LedgerError> {
        let previous = self.latest();
        let created_at = unix_now()?.max(previous.created_at());
        let entry = LedgerEntry::create(
            previous.index() + 1,
            created_at,
            digest.as_str(),
            *previous.commitment(),
        );
        self.entries.push(entry);
        Ok(self.latest())
    }

    /// Verify the full chain, returning the first violation found.
    ///
    /// Every entry's predecessor link is checked (the genesis entry's must
    /// be the sentinel) and every entry's commitment is recomputed, genesis
    /// included. Linear in chain length; never mutates state.
    pub fn verify(&self) -> Result<(), IntegrityViolation> {
        for (i, entry) in self.entries.iter().enumerate() {
            let index = entry.index();

            // Link check first: a tampered predecessor link is reported as a
            // broken link, even though it also invalidates the commitment.
            let link_intact = match i {
                0 => entry.previous_commitment().is_sentinel(),
                _ => entry.previous_commitment() == self.entries[i - 1].commitment(),
            };
            if !link_intact {
                return Err(IntegrityViolation::LinkMismatch { index });
            }

            if entry.recompute_commitment() != *entry.commitment() {
                return Err(IntegrityViolation::CommitmentMismatch { index });
            }
        }
        Ok(())
    }

    /// Find the first (lowest-index) entry whose payload equals `digest`.
    ///
    /// Duplicate payloads are allowed (re-notarizing the same content adds a
    /// new entry); the lowest index is the defined tie-break.
    pub fn find_by_payload(&self, digest: &Digest) -> Option<EntryRef> {
        self.entries
            .iter()
            .find(|entry| entry.payload() == digest.as_str())
            .map(EntryRef::from)
    }

    /// The tail entry. Total: the chain always contains at least genesis.
    pub fn latest(&self) -> &LedgerEntry {
        self.entries
            .last()
            .expect("ledger invariant: chain is never empty")
    }

    /// Number of entries, genesis included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; present for clippy's `len`-without-`is_empty` lint.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The full entry sequence in index order.
    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }
}

/// Seconds since UNIX epoch, fractional.
fn unix_now() -> Result<f64, LedgerError> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .map_err(|_| LedgerError::ClockUnavailable)
}

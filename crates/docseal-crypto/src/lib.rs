//! Commitment computation for DocSeal.
//!
//! A ledger entry's commitment is the BLAKE3 hash of a canonical,
//! length-prefixed encoding of its fields. The encoding is injective: no two
//! distinct `(index, created_at, payload, previous_commitment)` tuples encode
//! to the same byte sequence, so the commitment binds the entry exactly.

pub mod seal;

pub use seal::{entry_commitment, ENTRY_DOMAIN};

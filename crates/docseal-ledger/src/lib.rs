//! Append-only notarization ledger for DocSeal.
//!
//! This crate is the heart of DocSeal. It provides:
//! - [`LedgerEntry`]: immutable, hash-linked notarization records
//! - [`Ledger`]: the append-only chain with explicit integrity verification
//! - [`BatchIngestor`]: fold many candidate digests into the chain with
//!   per-item outcomes and a single save point
//!
//! The ledger is a local, single-writer integrity log: one process owns one
//! chain and its backing file. Persistence lives in `docseal-store`.

pub mod batch;
pub mod entry;
pub mod error;
pub mod ledger;

pub use batch::{BatchIngestor, BatchItem, BatchOutcome};
pub use entry::{LedgerEntry, GENESIS_PAYLOAD};
pub use error::{IntegrityViolation, LedgerError};
pub use ledger::{EntryRef, Ledger};

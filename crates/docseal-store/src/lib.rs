//! Durable persistence for the DocSeal ledger.
//!
//! One ledger, one JSON file: [`ChainFile`] translates the in-memory chain
//! to and from its durable representation. Loading bootstraps a fresh
//! genesis ledger when no file exists; saving rewrites the entire chain
//! atomically so previously durable state survives any failed write.

pub mod error;
pub mod file;

pub use error::{StoreError, StoreResult};
pub use file::ChainFile;

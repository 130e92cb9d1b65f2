//! Foundation types for DocSeal.
//!
//! This crate provides the value types shared across the DocSeal workspace.
//! Every other DocSeal crate depends on `docseal-types`.
//!
//! # Key Types
//!
//! - [`Commitment`] — 32-byte cryptographic commitment binding a ledger entry
//! - [`Digest`] — opaque content fingerprint supplied by a digest producer
//! - [`TypeError`] — shared decode/validation errors

pub mod commitment;
pub mod digest;
pub mod error;

pub use commitment::Commitment;
pub use digest::Digest;
pub use error::TypeError;

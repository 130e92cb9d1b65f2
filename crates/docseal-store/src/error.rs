use docseal_ledger::LedgerError;

/// Errors from persistence operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The durable representation exists but is structurally invalid
    /// (malformed JSON, missing fields, wrong types, bad hex, empty chain).
    /// Surfaced rather than recovered: silently falling back to a fresh
    /// chain would mask tampering or corruption.
    #[error("corrupt persisted ledger: {reason}")]
    Corrupt { reason: String },

    /// I/O failure reading or writing the chain file. A failed save leaves
    /// the previously durable content untouched.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The chain could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// First-run bootstrap could not build a genesis ledger.
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

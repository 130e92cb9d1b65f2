/// Errors produced by ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// The time source could not produce a usable timestamp. The append that
    /// observed this added no entry.
    #[error("system clock unavailable: cannot timestamp entry")]
    ClockUnavailable,

    /// Reconstruction was handed an empty entry sequence. A ledger always
    /// contains at least its genesis entry.
    #[error("cannot reconstruct a ledger from an empty entry sequence")]
    EmptyChain,
}

/// A specific integrity violation detected by verification.
///
/// Carries the offending entry index so an operator can investigate the
/// exact record. Verification reports the first violation found.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntegrityViolation {
    /// Recomputing the entry's commitment from its stored fields did not
    /// reproduce the stored commitment: the entry itself was altered.
    #[error("commitment mismatch at index {index}: stored commitment does not match recomputation")]
    CommitmentMismatch { index: u64 },

    /// The entry's stored predecessor link does not match the previous
    /// entry's commitment (or, at index 0, is not the sentinel): the chain
    /// was broken between entries.
    #[error("link mismatch at index {index}: previous commitment does not match predecessor")]
    LinkMismatch { index: u64 },
}

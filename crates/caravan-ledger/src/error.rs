use thiserror::Error;

/// Errors from ledger operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// The entry failed structural checks before append.
    #[error("invalid entry: {0}")]
    InvalidEntry(String),

    /// Serialization failure while hashing or storing an entry.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// A stored entry no longer matches its recorded hash.
    #[error("integrity violation at seq {seq}: {reason}")]
    IntegrityViolation { seq: u64, reason: String },
}

/// Result alias for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

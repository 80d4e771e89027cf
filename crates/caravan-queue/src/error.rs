use thiserror::Error;

/// Errors from queue operations.
///
/// Validation failures and local persistence faults are the only things
/// surfaced as `Err`; transport failures are folded into
/// [`SyncOutcome`](crate::SyncOutcome) values instead.
#[derive(Debug, Error)]
pub enum QueueError {
    /// `create_record` was called with an empty subject identifier.
    #[error("subject id must not be empty")]
    EmptySubject,

    /// `create_record` was called with empty logical content.
    #[error("record content must not be empty")]
    EmptyContent,

    /// The injected payload encryptor failed to seal the content.
    #[error("payload encryption failed: {0}")]
    Encrypt(String),

    /// The persisted snapshot failed its integrity checks on load.
    #[error("corrupt snapshot: {0}")]
    CorruptSnapshot(String),

    /// Snapshot serialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error from the underlying storage.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for queue operations.
pub type QueueResult<T> = Result<T, QueueError>;

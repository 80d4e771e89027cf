use caravan_types::ContentRef;

/// Errors from content store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The requested blob was not found.
    #[error("content not found: {0}")]
    NotFound(ContentRef),

    /// Content digest mismatch on read (data corruption).
    #[error("digest mismatch for {reference}: computed {computed}")]
    DigestMismatch {
        reference: ContentRef,
        computed: String,
    },

    /// Attempted to store an empty blob.
    #[error("cannot store empty content")]
    EmptyContent,

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

use thiserror::Error;

/// Transport failures.
///
/// Every variant means "the batch may or may not have reached the gateway;
/// nothing was changed locally". The queue manager folds these into a
/// `SyncOutcome` value rather than letting them escape as faults.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The gateway could not be reached (DNS, refused connection, ...).
    #[error("gateway unreachable: {0}")]
    Unreachable(String),

    /// The request exceeded the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// The gateway answered with a non-success HTTP status.
    #[error("gateway returned status {code}")]
    Status { code: u16 },

    /// The gateway refused the batch as a whole (`success = false`).
    #[error("batch refused by gateway")]
    BatchRefused,

    /// The response body could not be decoded.
    #[error("malformed response: {0}")]
    Decode(String),

    /// The transport itself could not be constructed.
    #[error("transport configuration error: {0}")]
    Config(String),
}

/// Result alias for transport operations.
pub type SyncResult<T> = Result<T, SyncError>;

use thiserror::Error;

/// Errors from running the gateway.
///
/// Per-record anchoring faults never surface here; they become rejected
/// receipts inside the batch response. This type covers the gateway process
/// itself.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("store error: {0}")]
    Store(#[from] caravan_store::StoreError),

    #[error("ledger error: {0}")]
    Ledger(#[from] caravan_ledger::LedgerError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type GatewayResult<T> = Result<T, GatewayError>;

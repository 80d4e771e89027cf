//! Wire contract for Caravan synchronization.
//!
//! Defines the request/response shapes exchanged between field clients and
//! the anchoring gateway. One logical operation carries the whole protocol:
//! a batch of pending records goes up, a per-record receipt list comes back.
//! The transport performs no retries; repeated `sync_now` calls on the
//! client are the retry mechanism.

pub mod endpoint;
pub mod message;

pub use endpoint::{endpoints, HealthResponse};
pub use message::{
    AnchorCheck, ReceiptOutcome, RecordReceipt, RejectReason, SyncResponse, PROTOCOL_VERSION,
};

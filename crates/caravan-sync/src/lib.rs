//! Client-side synchronization transport for Caravan.
//!
//! A transport carries one logical operation (upload a batch of pending
//! records, get back per-record receipts) plus the read-only anchor check
//! used to promote synced records to verified. Transports
//! never retry internally: the queue manager's repeated `sync_now` calls
//! are the retry mechanism, which keeps failure behavior observable.

pub mod error;
pub mod http;
pub mod transport;

pub use error::{SyncError, SyncResult};
pub use http::HttpSyncTransport;
pub use transport::SyncTransport;

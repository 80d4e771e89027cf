//! Client-side durable record queue for Caravan.
//!
//! A field device records events while disconnected; this crate is the
//! durability boundary that makes that safe. Records are persisted locally
//! the moment they are created, classified by sync status, and shipped to a
//! gateway in batches whenever the caller decides to try.
//!
//! # Components
//!
//! - [`RecordStore`] — the persistence contract (`put`, `get_all`,
//!   `get_by_status`, atomic `replace_all`)
//! - [`FileRecordStore`] — crash-safe single-file snapshot store
//! - [`InMemoryRecordStore`] — for tests and embedding
//! - [`QueueManager`] — creates, hashes, signs, and syncs records
//! - [`SyncOutcome`] — what a sync attempt did (never an unhandled fault)
//!
//! The network is assumed unreliable: a failed sync leaves every record
//! PENDING and untouched, and calling [`QueueManager::sync_now`] again is
//! the retry mechanism.

pub mod encrypt;
pub mod error;
pub mod file;
pub mod manager;
pub mod outcome;
pub mod store;

pub use encrypt::{PassthroughEncryptor, PayloadEncryptor};
pub use error::{QueueError, QueueResult};
pub use file::FileRecordStore;
pub use manager::{QueueConfig, QueueManager};
pub use outcome::{RejectedRecord, SyncOutcome};
pub use store::{InMemoryRecordStore, RecordStore};

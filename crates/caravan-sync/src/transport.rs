use async_trait::async_trait;

use caravan_protocol::{AnchorCheck, RecordReceipt};
use caravan_types::{IntegrityHash, Record};

use crate::error::SyncResult;

/// Transport to a remote anchoring gateway.
///
/// A single attempt per call, no internal retries, bounded by the
/// transport's configured timeout. Implementations must never mutate the
/// records they are handed.
#[async_trait]
pub trait SyncTransport: Send + Sync {
    /// Upload one batch of records; returns one receipt per processed
    /// record, in any order.
    async fn upload_batch(&self, records: &[Record]) -> SyncResult<Vec<RecordReceipt>>;

    /// Ask the gateway's ledger whether a record hash is anchored.
    async fn check_anchor(&self, hash: &IntegrityHash) -> SyncResult<AnchorCheck>;
}

use std::collections::HashMap;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use caravan_crypto::{integrity_hash_of, SigningKey};
use caravan_protocol::RecordReceipt;
use caravan_sync::SyncTransport;
use caravan_types::{unix_millis, ActorId, OriginId, Record, RecordId, SubjectId, SyncStatus};

use crate::encrypt::PayloadEncryptor;
use crate::error::{QueueError, QueueResult};
use crate::outcome::{RejectedRecord, SyncOutcome};
use crate::store::RecordStore;

/// Identity of the device this queue runs on.
#[derive(Clone, Debug)]
pub struct QueueConfig {
    /// Actor who authors every record created here.
    pub author_id: ActorId,
    /// Device/location the records originate from.
    pub origin_id: OriginId,
}

/// Client-side record queue: creates, persists, and syncs records.
///
/// The local store is the durability boundary; the network is assumed
/// unreliable and is retried from the same PENDING state each attempt. A
/// writer mutex serializes all store mutations, so a sync round applies its
/// acknowledgments against a consistent snapshot and a record created
/// during an in-flight sync simply waits for the next round.
pub struct QueueManager<S, T> {
    store: S,
    transport: T,
    encryptor: Box<dyn PayloadEncryptor>,
    author_key: SigningKey,
    config: QueueConfig,
    writer: Mutex<()>,
}

impl<S: RecordStore, T: SyncTransport> QueueManager<S, T> {
    /// Create a queue manager over the given store and transport.
    pub fn new(
        store: S,
        transport: T,
        encryptor: Box<dyn PayloadEncryptor>,
        author_key: SigningKey,
        config: QueueConfig,
    ) -> Self {
        Self {
            store,
            transport,
            encryptor,
            author_key,
            config,
            writer: Mutex::new(()),
        }
    }

    /// Create a record and persist it locally immediately.
    ///
    /// The integrity hash covers `logical_content` before encryption; the
    /// stored payload is whatever the injected encryptor sealed. Returns
    /// the persisted record with `status = Pending`.
    pub async fn create_record(
        &self,
        subject_id: SubjectId,
        logical_content: &[u8],
    ) -> QueueResult<Record> {
        if subject_id.is_empty() {
            return Err(QueueError::EmptySubject);
        }
        if logical_content.is_empty() {
            return Err(QueueError::EmptyContent);
        }

        let integrity_hash = integrity_hash_of(logical_content);
        let payload = self.encryptor.seal(logical_content)?;
        let signature = self.author_key.sign_hash(&integrity_hash);

        let record = Record {
            id: RecordId::new(),
            subject_id,
            author_id: self.config.author_id.clone(),
            origin_id: self.config.origin_id.clone(),
            created_at: unix_millis(),
            payload,
            integrity_hash,
            signature,
            status: SyncStatus::Pending,
            content_ref: None,
            ledger_ref: None,
        };

        let _guard = self.writer.lock().await;
        self.store.put(record.clone())?;
        info!(id = %record.id, "record saved locally");
        Ok(record)
    }

    /// Number of records waiting for delivery. Cheap enough for callers to
    /// poll at their own cadence.
    pub async fn pending_count(&self) -> QueueResult<usize> {
        Ok(self.store.get_by_status(SyncStatus::Pending)?.len())
    }

    /// All local records, in creation order.
    pub async fn records(&self) -> QueueResult<Vec<Record>> {
        self.store.get_all()
    }

    /// Attempt one sync round: upload every PENDING record as a single
    /// batch and apply the per-record acknowledgments.
    ///
    /// One transport attempt per call; calling again is the retry. On any
    /// transport failure the local store is left untouched, so the same
    /// records are safely re-sent next time.
    pub async fn sync_now(&self) -> QueueResult<SyncOutcome> {
        let pending = {
            let _guard = self.writer.lock().await;
            self.store.get_by_status(SyncStatus::Pending)?
        };
        if pending.is_empty() {
            debug!("nothing pending; skipping network call");
            return Ok(SyncOutcome::NothingPending);
        }

        // Network I/O happens outside the writer lock; records created while
        // the batch is in flight stay PENDING for the next round.
        let receipts = match self.transport.upload_batch(&pending).await {
            Ok(receipts) => receipts,
            Err(e) => {
                warn!(error = %e, "sync failed; records remain pending");
                return Ok(SyncOutcome::TransportFailed {
                    reason: e.to_string(),
                });
            }
        };

        self.apply_receipts(&pending, receipts).await
    }

    /// Apply acknowledgments for the records of one sync round.
    async fn apply_receipts(
        &self,
        sent: &[Record],
        receipts: Vec<RecordReceipt>,
    ) -> QueueResult<SyncOutcome> {
        let by_id: HashMap<RecordId, RecordReceipt> =
            receipts.into_iter().map(|r| (r.record_id, r)).collect();

        let _guard = self.writer.lock().await;
        let mut all = self.store.get_all()?;
        let mut accepted = 0usize;
        let mut rejected = Vec::new();

        for record in all.iter_mut() {
            // Only records from this round can be acknowledged; anything
            // created mid-flight has no receipt and stays PENDING.
            let Some(receipt) = by_id.get(&record.id) else {
                continue;
            };
            if !sent.iter().any(|s| s.id == record.id) {
                continue;
            }

            match (receipt.is_accepted(), receipt.content_ref, receipt.ledger_ref) {
                (true, Some(content_ref), Some(ledger_ref)) => {
                    record.mark_synced(content_ref, ledger_ref);
                    accepted += 1;
                }
                (true, _, _) => {
                    // An accepted receipt without references is malformed;
                    // leave the record PENDING rather than half-anchor it.
                    warn!(id = %record.id, "accepted receipt missing references; ignoring");
                    rejected.push(RejectedRecord {
                        id: record.id,
                        reason: None,
                    });
                }
                (false, _, _) => {
                    rejected.push(RejectedRecord {
                        id: record.id,
                        reason: receipt.reason,
                    });
                }
            }
        }

        self.store.replace_all(all)?;
        info!(accepted, rejected = rejected.len(), "sync round applied");
        Ok(SyncOutcome::Completed { accepted, rejected })
    }

    /// Poll the gateway's ledger for every SYNCED record and promote the
    /// confirmed ones to VERIFIED. Returns how many were promoted; a
    /// transport failure stops the poll but keeps what was already
    /// confirmed.
    pub async fn confirm_anchored(&self) -> QueueResult<usize> {
        let synced = self.store.get_by_status(SyncStatus::Synced)?;
        if synced.is_empty() {
            return Ok(0);
        }

        let mut confirmed = Vec::new();
        for record in &synced {
            match self.transport.check_anchor(&record.integrity_hash).await {
                Ok(check) if check.valid => confirmed.push(record.id),
                Ok(_) => {
                    debug!(id = %record.id, "anchor not yet confirmed");
                }
                Err(e) => {
                    warn!(error = %e, "verification poll interrupted");
                    break;
                }
            }
        }
        if confirmed.is_empty() {
            return Ok(0);
        }

        let _guard = self.writer.lock().await;
        let mut all = self.store.get_all()?;
        let mut promoted = 0usize;
        for record in all.iter_mut() {
            if confirmed.contains(&record.id) && record.mark_verified().is_ok() {
                promoted += 1;
            }
        }
        self.store.replace_all(all)?;
        info!(promoted, "verification poll applied");
        Ok(promoted)
    }
}

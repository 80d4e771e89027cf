use tracing::{debug, info, warn};

use caravan_crypto::subject_hash_of;
use caravan_ledger::AnchorEntry;
use caravan_protocol::{RecordReceipt, RejectReason, SyncResponse};
use caravan_types::{unix_millis, Record};

use crate::state::GatewayState;

/// Anchor a batch of records, one receipt per record.
///
/// Each record moves through validate → dedup-check → content store →
/// ledger independently; a failing record is rejected in its receipt while
/// its siblings proceed. A batch over the configured size limit is refused
/// whole, with no record touched.
pub fn anchor_batch(state: &GatewayState, records: Vec<Record>) -> SyncResponse {
    if records.len() > state.config().max_batch_size {
        warn!(
            count = records.len(),
            limit = state.config().max_batch_size,
            "batch refused: too large"
        );
        return SyncResponse::refused();
    }

    info!(count = records.len(), "anchoring batch");
    let results = records
        .into_iter()
        .map(|record| anchor_record(state, record))
        .collect();
    SyncResponse::processed(results)
}

/// Anchor a single record.
fn anchor_record(state: &GatewayState, mut record: Record) -> RecordReceipt {
    let id = record.id;
    if let Err(reason) = validate(&record) {
        warn!(id = %id, %reason, "record rejected");
        return RecordReceipt::rejected(id, RejectReason::InvalidRecord);
    }

    // A client retry after a lost response must not anchor twice: if the
    // hash is already in the ledger, acknowledge with the original entry.
    // The content put below is idempotent, so re-running it just recovers
    // the same reference.
    let prior = match state.ledger().find_by_hash(&record.integrity_hash) {
        Ok(prior) => prior,
        Err(e) => {
            warn!(id = %id, error = %e, "ledger lookup failed");
            return RecordReceipt::rejected(id, RejectReason::AnchorFailed);
        }
    };

    let canonical = match serde_json::to_vec(&record) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(id = %id, error = %e, "record serialization failed");
            return RecordReceipt::rejected(id, RejectReason::AnchorFailed);
        }
    };
    let content_ref = match state.content_store().put(&canonical) {
        Ok(reference) => reference,
        Err(e) => {
            warn!(id = %id, error = %e, "content store put failed");
            return RecordReceipt::rejected(id, RejectReason::AnchorFailed);
        }
    };

    let ledger_ref = match prior {
        Some((existing_ref, _)) => {
            debug!(id = %id, seq = existing_ref.seq, "already anchored; reusing entry");
            existing_ref
        }
        None => {
            let entry = AnchorEntry::new(
                record.integrity_hash,
                subject_hash_of(&record.subject_id),
                unix_millis(),
                state.attestor_key().sign_hash(&record.integrity_hash),
            );
            match state.ledger().append(entry) {
                Ok(reference) => reference,
                Err(e) => {
                    warn!(id = %id, error = %e, "ledger append failed");
                    return RecordReceipt::rejected(id, RejectReason::AnchorFailed);
                }
            }
        }
    };

    record.mark_synced(content_ref, ledger_ref);
    state.store_record(record);
    debug!(id = %id, seq = ledger_ref.seq, "record anchored");
    RecordReceipt::accepted(id, content_ref, ledger_ref)
}

/// Structural validation: required fields present, integrity hash
/// well-formed. Rejected records are not stored and not anchored.
fn validate(record: &Record) -> Result<(), &'static str> {
    if record.id.is_nil() {
        return Err("record id is nil");
    }
    if record.subject_id.is_empty() {
        return Err("subject id is empty");
    }
    if record.author_id.is_empty() {
        return Err("author id is empty");
    }
    if record.origin_id.is_empty() {
        return Err("origin id is empty");
    }
    if record.payload.is_empty() {
        return Err("payload is empty");
    }
    if record.integrity_hash.is_null() {
        return Err("integrity hash is null");
    }
    if record.signature.is_empty() {
        return Err("signature is empty");
    }
    Ok(())
}

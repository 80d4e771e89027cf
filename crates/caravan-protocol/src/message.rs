use serde::{Deserialize, Serialize};

use caravan_types::{ContentRef, LedgerRef, RecordId};

pub const PROTOCOL_VERSION: u32 = 1;

/// Per-record result of an anchoring attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReceiptOutcome {
    /// The record was validated and anchored; references are populated.
    Accepted,
    /// The record was not anchored; `reason` says why.
    Rejected,
}

/// Why a record was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    /// Structural validation failed; the record was not stored or anchored.
    InvalidRecord,
    /// An internal store or ledger fault interrupted anchoring. Safe to
    /// retry: the content store and dedup check make the retry converge.
    AnchorFailed,
    /// The batch exceeded the gateway's configured size limit.
    BatchTooLarge,
}

/// Acknowledgment for a single record within a batch.
///
/// Receipts come back in any order; clients match them to local records by
/// `record_id`. An accepted receipt always carries both references.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordReceipt {
    pub record_id: RecordId,
    pub outcome: ReceiptOutcome,
    pub content_ref: Option<ContentRef>,
    pub ledger_ref: Option<LedgerRef>,
    pub reason: Option<RejectReason>,
}

impl RecordReceipt {
    /// Receipt for a successfully anchored record.
    pub fn accepted(record_id: RecordId, content_ref: ContentRef, ledger_ref: LedgerRef) -> Self {
        Self {
            record_id,
            outcome: ReceiptOutcome::Accepted,
            content_ref: Some(content_ref),
            ledger_ref: Some(ledger_ref),
            reason: None,
        }
    }

    /// Receipt for a record the gateway refused to anchor.
    pub fn rejected(record_id: RecordId, reason: RejectReason) -> Self {
        Self {
            record_id,
            outcome: ReceiptOutcome::Rejected,
            content_ref: None,
            ledger_ref: None,
            reason: Some(reason),
        }
    }

    /// Returns `true` for accepted receipts.
    pub fn is_accepted(&self) -> bool {
        self.outcome == ReceiptOutcome::Accepted
    }
}

/// Response envelope for a batch upload.
///
/// `success` is `true` when the batch was processed at all (even with
/// per-record rejections inside); `false` means the batch as a whole was
/// refused and no record was touched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncResponse {
    pub success: bool,
    pub results: Vec<RecordReceipt>,
}

impl SyncResponse {
    /// A processed batch with per-record results.
    pub fn processed(results: Vec<RecordReceipt>) -> Self {
        Self {
            success: true,
            results,
        }
    }

    /// A refused batch (nothing was anchored).
    pub fn refused() -> Self {
        Self {
            success: false,
            results: Vec::new(),
        }
    }
}

/// Response of the public verification endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorCheck {
    /// `true` iff at least one ledger entry anchors the queried hash.
    pub valid: bool,
    /// Anchoring time of the earliest matching entry.
    pub anchored_at: Option<u64>,
}

impl AnchorCheck {
    pub fn anchored(anchored_at: u64) -> Self {
        Self {
            valid: true,
            anchored_at: Some(anchored_at),
        }
    }

    pub fn unknown() -> Self {
        Self {
            valid: false,
            anchored_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn refs() -> (ContentRef, LedgerRef) {
        (
            ContentRef::from_hash([0x01; 32]),
            LedgerRef::new(3, [0x02; 32]),
        )
    }

    #[test]
    fn accepted_receipt_carries_refs() {
        let (content_ref, ledger_ref) = refs();
        let r = RecordReceipt::accepted(RecordId::new(), content_ref, ledger_ref);
        assert!(r.is_accepted());
        assert_eq!(r.content_ref, Some(content_ref));
        assert_eq!(r.ledger_ref, Some(ledger_ref));
        assert!(r.reason.is_none());
    }

    #[test]
    fn rejected_receipt_carries_reason_only() {
        let r = RecordReceipt::rejected(RecordId::new(), RejectReason::InvalidRecord);
        assert!(!r.is_accepted());
        assert!(r.content_ref.is_none());
        assert!(r.ledger_ref.is_none());
        assert_eq!(r.reason, Some(RejectReason::InvalidRecord));
    }

    #[test]
    fn response_envelopes() {
        let processed = SyncResponse::processed(vec![]);
        assert!(processed.success);
        let refused = SyncResponse::refused();
        assert!(!refused.success);
        assert!(refused.results.is_empty());
    }

    #[test]
    fn anchor_check_constructors() {
        let hit = AnchorCheck::anchored(1_700_000_000_000);
        assert!(hit.valid);
        assert_eq!(hit.anchored_at, Some(1_700_000_000_000));

        let miss = AnchorCheck::unknown();
        assert!(!miss.valid);
        assert!(miss.anchored_at.is_none());
    }

    #[test]
    fn receipt_serde_roundtrip() {
        let (content_ref, ledger_ref) = refs();
        let r = RecordReceipt::accepted(RecordId::new(), content_ref, ledger_ref);
        let json = serde_json::to_string(&r).unwrap();
        let parsed: RecordReceipt = serde_json::from_str(&json).unwrap();
        assert_eq!(r, parsed);
    }

    #[test]
    fn response_serde_roundtrip() {
        let response = SyncResponse::processed(vec![RecordReceipt::rejected(
            RecordId::new(),
            RejectReason::AnchorFailed,
        )]);
        let json = serde_json::to_string(&response).unwrap();
        let parsed: SyncResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(response, parsed);
    }
}

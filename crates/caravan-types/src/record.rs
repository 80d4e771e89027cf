use std::fmt;

use serde::{Deserialize, Serialize};

use crate::anchor::{ContentRef, LedgerRef};
use crate::error::TypeError;
use crate::hash::IntegrityHash;
use crate::id::{ActorId, OriginId, RecordId, SubjectId};

/// Per-record sync lifecycle.
///
/// - `Pending`: stored locally, not yet delivered to a gateway.
/// - `Synced`: acknowledged by a gateway; anchoring references populated.
/// - `Verified`: anchoring independently confirmed against the ledger.
///
/// Transitions only ever move forward; a record never regresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SyncStatus {
    Pending,
    Synced,
    Verified,
}

impl SyncStatus {
    /// Position in the lifecycle, 0-based.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Pending => 0,
            Self::Synced => 1,
            Self::Verified => 2,
        }
    }

    /// Returns `true` if moving to `next` would not regress.
    pub fn can_become(&self, next: SyncStatus) -> bool {
        next.rank() >= self.rank()
    }
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::Synced => write!(f, "SYNCED"),
            Self::Verified => write!(f, "VERIFIED"),
        }
    }
}

/// The immutable unit of offline-captured data.
///
/// Everything except `status` and the anchoring references is fixed at
/// creation time. The payload is an opaque encrypted blob; the integrity
/// hash covers the *unencrypted* logical content, so it is stable across
/// encryption nondeterminism and verifiable without the plaintext key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub subject_id: SubjectId,
    pub author_id: ActorId,
    pub origin_id: OriginId,
    /// Client-authoritative creation time (ms since epoch), set once.
    pub created_at: u64,
    /// Opaque encrypted blob. The core never inspects its plaintext.
    pub payload: Vec<u8>,
    pub integrity_hash: IntegrityHash,
    /// Opaque author signature over `integrity_hash`. Forwarded and
    /// persisted, never interpreted here.
    pub signature: Vec<u8>,
    pub status: SyncStatus,
    pub content_ref: Option<ContentRef>,
    pub ledger_ref: Option<LedgerRef>,
}

impl Record {
    /// Returns `true` while the record has not been delivered to a gateway.
    pub fn is_pending(&self) -> bool {
        self.status == SyncStatus::Pending
    }

    /// Apply a gateway acknowledgment: attach the anchoring references and
    /// advance to `Synced`.
    ///
    /// Idempotent for records that are already `Synced` or `Verified`: a
    /// re-delivered acknowledgment never overwrites existing references or
    /// regresses status.
    pub fn mark_synced(&mut self, content_ref: ContentRef, ledger_ref: LedgerRef) {
        if self.status == SyncStatus::Pending {
            self.status = SyncStatus::Synced;
        }
        self.content_ref.get_or_insert(content_ref);
        self.ledger_ref.get_or_insert(ledger_ref);
    }

    /// Promote a synced record to `Verified` after the ledger confirmed its
    /// hash. A record that was never synced cannot be verified.
    pub fn mark_verified(&mut self) -> Result<(), TypeError> {
        match self.status {
            SyncStatus::Synced => {
                self.status = SyncStatus::Verified;
                Ok(())
            }
            SyncStatus::Verified => Ok(()),
            SyncStatus::Pending => Err(TypeError::InvalidTransition {
                from: self.status.to_string(),
                to: SyncStatus::Verified.to_string(),
            }),
        }
    }
}

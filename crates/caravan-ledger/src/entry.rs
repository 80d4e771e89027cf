use serde::{Deserialize, Serialize};

use caravan_crypto::DomainHasher;
use caravan_types::{IntegrityHash, SubjectHash};

use crate::error::{LedgerError, LedgerResult};

/// A single anchoring proof in the append-only ledger.
///
/// Deliberately minimal: nothing in an entry identifies the subject or the
/// record content. `record_hash` proves *which* content was anchored,
/// `subject_hash` allows per-subject correlation without holding the raw
/// identifier, and `attestor_signature` is the gateway's proof that it
/// processed the record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorEntry {
    /// The record's integrity hash.
    pub record_hash: IntegrityHash,
    /// One-way hash of the record's subject identifier.
    pub subject_hash: SubjectHash,
    /// Gateway clock at anchoring time (ms since epoch).
    pub anchored_at: u64,
    /// Gateway signature over `record_hash`.
    pub attestor_signature: Vec<u8>,
}

impl AnchorEntry {
    /// Create a new entry.
    pub fn new(
        record_hash: IntegrityHash,
        subject_hash: SubjectHash,
        anchored_at: u64,
        attestor_signature: Vec<u8>,
    ) -> Self {
        Self {
            record_hash,
            subject_hash,
            anchored_at,
            attestor_signature,
        }
    }

    /// Domain-separated digest of this entry's canonical JSON form.
    ///
    /// Used as the tamper-evidence half of a
    /// [`LedgerRef`](caravan_types::LedgerRef).
    pub fn entry_hash(&self) -> LedgerResult<[u8; 32]> {
        DomainHasher::ENTRY
            .hash_json(self)
            .map_err(|e| LedgerError::Serialization(e.to_string()))
    }
}

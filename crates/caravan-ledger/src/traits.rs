use caravan_types::{IntegrityHash, LedgerRef};

use crate::entry::AnchorEntry;
use crate::error::LedgerResult;

/// Append-only anchor ledger.
///
/// The gateway is the only writer. Appends of unrelated records may happen
/// concurrently; implementations serialize the append itself but must not
/// hold any lock across other records' work.
pub trait AnchorLedger: Send + Sync {
    /// Append an entry, returning its position reference.
    ///
    /// The ledger accepts duplicate `record_hash` values; callers that want
    /// dedup must check [`find_by_hash`](Self::find_by_hash) first.
    fn append(&self, entry: AnchorEntry) -> LedgerResult<LedgerRef>;

    /// Find the *first* entry anchoring the given record hash.
    fn find_by_hash(&self, hash: &IntegrityHash) -> LedgerResult<Option<(LedgerRef, AnchorEntry)>>;

    /// All entries anchoring the given record hash, in append order.
    ///
    /// More than one element means a duplicate anchoring slipped through.
    fn entries_for_hash(&self, hash: &IntegrityHash) -> LedgerResult<Vec<(LedgerRef, AnchorEntry)>>;

    /// Total number of entries appended so far.
    fn entry_count(&self) -> LedgerResult<u64>;
}

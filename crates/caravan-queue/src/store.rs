use std::collections::HashMap;
use std::sync::RwLock;

use caravan_types::{Record, RecordId, SyncStatus};

use crate::error::QueueResult;

/// Local record persistence contract.
///
/// All implementations must satisfy these invariants:
/// - `put` and `replace_all` are atomic with respect to concurrent reads:
///   no reader ever observes a partially written collection.
/// - Once `put` returns `Ok`, the record survives process restart (for
///   durable backends).
/// - `get_all` returns records in id order; UUID v7 ids make that creation
///   order for records from a single device.
pub trait RecordStore: Send + Sync {
    /// Insert or overwrite a record, keyed by its id.
    fn put(&self, record: Record) -> QueueResult<()>;

    /// Read a single record by id.
    fn get(&self, id: &RecordId) -> QueueResult<Option<Record>>;

    /// All records, in id order.
    fn get_all(&self) -> QueueResult<Vec<Record>>;

    /// Records currently in the given status, in id order.
    fn get_by_status(&self, status: SyncStatus) -> QueueResult<Vec<Record>> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|r| r.status == status)
            .collect())
    }

    /// Atomically overwrite the whole collection. Used after a sync round
    /// to apply per-record acknowledgments in one step.
    fn replace_all(&self, records: Vec<Record>) -> QueueResult<()>;
}

/// In-memory record store for tests and embedding.
pub struct InMemoryRecordStore {
    records: RwLock<HashMap<RecordId, Record>>,
}

impl InMemoryRecordStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore for InMemoryRecordStore {
    fn put(&self, record: Record) -> QueueResult<()> {
        let mut map = self.records.write().expect("lock poisoned");
        map.insert(record.id, record);
        Ok(())
    }

    fn get(&self, id: &RecordId) -> QueueResult<Option<Record>> {
        let map = self.records.read().expect("lock poisoned");
        Ok(map.get(id).cloned())
    }

    fn get_all(&self) -> QueueResult<Vec<Record>> {
        let map = self.records.read().expect("lock poisoned");
        let mut records: Vec<Record> = map.values().cloned().collect();
        records.sort_by_key(|r| r.id);
        Ok(records)
    }

    fn replace_all(&self, records: Vec<Record>) -> QueueResult<()> {
        let mut map = self.records.write().expect("lock poisoned");
        map.clear();
        map.extend(records.into_iter().map(|r| (r.id, r)));
        Ok(())
    }
}

impl std::fmt::Debug for InMemoryRecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryRecordStore")
            .field(
                "record_count",
                &self.records.read().expect("lock poisoned").len(),
            )
            .finish()
    }
}

use std::collections::HashMap;
use std::sync::RwLock;

use caravan_crypto::content_ref_of;
use caravan_types::ContentRef;

use crate::error::{StoreError, StoreResult};
use crate::traits::ContentStore;

/// In-memory, HashMap-based content store.
///
/// Intended for tests, demos, and embedding. All blobs are held in memory
/// behind a `RwLock` for safe concurrent access.
pub struct InMemoryContentStore {
    blobs: RwLock<HashMap<ContentRef, Vec<u8>>>,
}

impl InMemoryContentStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            blobs: RwLock::new(HashMap::new()),
        }
    }

    /// Total bytes across all stored blobs.
    pub fn total_bytes(&self) -> u64 {
        self.blobs
            .read()
            .expect("lock poisoned")
            .values()
            .map(|b| b.len() as u64)
            .sum()
    }

    /// Remove all blobs from the store.
    pub fn clear(&self) {
        self.blobs.write().expect("lock poisoned").clear();
    }
}

impl Default for InMemoryContentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentStore for InMemoryContentStore {
    fn put(&self, data: &[u8]) -> StoreResult<ContentRef> {
        if data.is_empty() {
            return Err(StoreError::EmptyContent);
        }
        let reference = content_ref_of(data);
        let mut map = self.blobs.write().expect("lock poisoned");
        // Idempotent: content-addressing guarantees the same reference
        // always maps to the same bytes.
        map.entry(reference).or_insert_with(|| data.to_vec());
        Ok(reference)
    }

    fn get(&self, reference: &ContentRef) -> StoreResult<Option<Vec<u8>>> {
        let map = self.blobs.read().expect("lock poisoned");
        Ok(map.get(reference).cloned())
    }

    fn contains(&self, reference: &ContentRef) -> StoreResult<bool> {
        let map = self.blobs.read().expect("lock poisoned");
        Ok(map.contains_key(reference))
    }

    fn len(&self) -> StoreResult<usize> {
        Ok(self.blobs.read().expect("lock poisoned").len())
    }
}

impl std::fmt::Debug for InMemoryContentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryContentStore")
            .field("blob_count", &self.blobs.read().expect("lock poisoned").len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_and_get_roundtrip() {
        let store = InMemoryContentStore::new();
        let reference = store.put(b"hello world").unwrap();
        let read_back = store.get(&reference).unwrap().expect("should exist");
        assert_eq!(read_back, b"hello world");
    }

    #[test]
    fn put_is_idempotent() {
        let store = InMemoryContentStore::new();
        let r1 = store.put(b"identical content").unwrap();
        let r2 = store.put(b"identical content").unwrap();
        assert_eq!(r1, r2);
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn different_content_produces_different_refs() {
        let store = InMemoryContentStore::new();
        let r1 = store.put(b"aaa").unwrap();
        let r2 = store.put(b"bbb").unwrap();
        assert_ne!(r1, r2);
        assert_eq!(store.len().unwrap(), 2);
    }

    #[test]
    fn empty_content_is_rejected() {
        let store = InMemoryContentStore::new();
        assert!(matches!(store.put(b""), Err(StoreError::EmptyContent)));
    }

    #[test]
    fn get_missing_returns_none() {
        let store = InMemoryContentStore::new();
        let reference = content_ref_of(b"never stored");
        assert!(store.get(&reference).unwrap().is_none());
        assert!(!store.contains(&reference).unwrap());
    }

    #[test]
    fn contains_present_blob() {
        let store = InMemoryContentStore::new();
        let reference = store.put(b"present").unwrap();
        assert!(store.contains(&reference).unwrap());
    }

    #[test]
    fn len_and_is_empty() {
        let store = InMemoryContentStore::new();
        assert!(store.is_empty().unwrap());
        store.put(b"a").unwrap();
        assert!(!store.is_empty().unwrap());
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn total_bytes_counts_deduped_content_once() {
        let store = InMemoryContentStore::new();
        store.put(b"12345").unwrap();
        store.put(b"12345").unwrap();
        store.put(b"123456789").unwrap();
        assert_eq!(store.total_bytes(), 14);
    }

    #[test]
    fn clear_removes_all() {
        let store = InMemoryContentStore::new();
        store.put(b"a").unwrap();
        store.put(b"b").unwrap();
        store.clear();
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn concurrent_reads_are_safe() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(InMemoryContentStore::new());
        let reference = store.put(b"shared data").unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    let blob = store.get(&reference).unwrap().unwrap();
                    assert_eq!(content_ref_of(&blob), reference);
                })
            })
            .collect();

        for h in handles {
            h.join().expect("thread should not panic");
        }
    }
}

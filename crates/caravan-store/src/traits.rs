use caravan_types::ContentRef;

use crate::error::StoreResult;

/// Content-addressed blob store.
///
/// All implementations must satisfy these invariants:
/// - Blobs are immutable once written; the same bytes always produce the
///   same reference, making `put` safe to repeat after a lost response.
/// - Concurrent reads are always safe.
/// - The store never interprets blob contents.
/// - All I/O errors are propagated, never silently ignored.
pub trait ContentStore: Send + Sync {
    /// Store bytes and return their content-addressed reference.
    ///
    /// Idempotent: if the content already exists this is a no-op returning
    /// the existing reference.
    fn put(&self, data: &[u8]) -> StoreResult<ContentRef>;

    /// Read a blob by reference. Returns `Ok(None)` if absent.
    fn get(&self, reference: &ContentRef) -> StoreResult<Option<Vec<u8>>>;

    /// Check whether a blob exists.
    fn contains(&self, reference: &ContentRef) -> StoreResult<bool>;

    /// Number of distinct blobs stored.
    fn len(&self) -> StoreResult<usize>;

    /// Returns `true` if the store holds no blobs.
    fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }
}

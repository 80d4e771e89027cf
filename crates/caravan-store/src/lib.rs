//! Content-addressed blob storage boundary for Caravan.
//!
//! The gateway anchors every accepted record's canonical bytes here and
//! receives a [`ContentRef`](caravan_types::ContentRef) derived from the
//! content itself. In production this boundary fronts a real
//! content-addressed network; the in-memory implementation ships for tests,
//! demos, and embedding.
//!
//! # Design Rules
//!
//! 1. Blobs are immutable once written (content-addressing guarantees this).
//! 2. `put` is idempotent: the same bytes always yield the same reference.
//! 3. Concurrent reads are always safe.
//! 4. The store never interprets blob contents.

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryContentStore;
pub use traits::ContentStore;

//! Foundation types for Caravan.
//!
//! This crate provides the record model, identifiers, and anchoring
//! references used throughout the Caravan system. Every other Caravan crate
//! depends on `caravan-types`.
//!
//! # Key Types
//!
//! - [`Record`] — The immutable unit of offline-captured data
//! - [`RecordId`] — Client-assigned UUID v7 record identifier
//! - [`SyncStatus`] — Per-record lifecycle (`Pending → Synced → Verified`)
//! - [`IntegrityHash`] — Digest of a record's unencrypted logical content
//! - [`SubjectHash`] — One-way hash of a subject identifier (double-blind)
//! - [`ContentRef`] / [`LedgerRef`] — References issued by anchoring

pub mod anchor;
pub mod clock;
pub mod error;
pub mod hash;
pub mod id;
pub mod record;

pub use anchor::{ContentRef, LedgerRef};
pub use clock::unix_millis;
pub use error::TypeError;
pub use hash::{IntegrityHash, SubjectHash};
pub use id::{ActorId, OriginId, RecordId, SubjectId};
pub use record::{Record, SyncStatus};

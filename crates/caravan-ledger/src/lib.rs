//! Append-only anchor ledger boundary for Caravan.
//!
//! Every accepted record leaves exactly one [`AnchorEntry`] behind: the
//! record's integrity hash, the blinded subject hash, the anchoring time,
//! and the gateway's attestor signature. Entries are never updated or
//! deleted, and the ledger is queryable by record hash so a third party can
//! confirm a record existed without the original device.
//!
//! The ledger itself does not enforce uniqueness of `record_hash`; a
//! gateway called twice *could* append twice. Avoiding that is the
//! gateway's job (it checks [`AnchorLedger::find_by_hash`] before
//! anchoring); [`AnchorLedger::entries_for_hash`] exists so tests can
//! observe that the dedup actually held.

pub mod entry;
pub mod error;
pub mod memory;
pub mod traits;

pub use entry::AnchorEntry;
pub use error::{LedgerError, LedgerResult};
pub use memory::InMemoryAnchorLedger;
pub use traits::AnchorLedger;

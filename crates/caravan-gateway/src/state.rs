use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use caravan_crypto::SigningKey;
use caravan_ledger::{AnchorLedger, InMemoryAnchorLedger};
use caravan_store::{ContentStore, InMemoryContentStore};
use caravan_types::{Record, RecordId};

use crate::config::GatewayConfig;

/// Shared gateway state: the injected anchoring collaborators, the attestor
/// key, and the gateway's own authoritative record copies.
pub struct GatewayState {
    config: GatewayConfig,
    content_store: Arc<dyn ContentStore>,
    ledger: Arc<dyn AnchorLedger>,
    attestor_key: SigningKey,
    records: RwLock<HashMap<RecordId, Record>>,
}

impl GatewayState {
    /// Build gateway state over injected collaborators.
    pub fn new(
        config: GatewayConfig,
        content_store: Arc<dyn ContentStore>,
        ledger: Arc<dyn AnchorLedger>,
        attestor_key: SigningKey,
    ) -> Self {
        Self {
            config,
            content_store,
            ledger,
            attestor_key,
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Fully in-memory gateway with a fresh attestor key. For tests, demos,
    /// and single-process deployments.
    pub fn in_memory(config: GatewayConfig) -> Self {
        Self::new(
            config,
            Arc::new(InMemoryContentStore::new()),
            Arc::new(InMemoryAnchorLedger::new()),
            SigningKey::generate(),
        )
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn content_store(&self) -> &dyn ContentStore {
        self.content_store.as_ref()
    }

    pub fn ledger(&self) -> &dyn AnchorLedger {
        self.ledger.as_ref()
    }

    pub fn attestor_key(&self) -> &SigningKey {
        &self.attestor_key
    }

    /// Store the gateway's authoritative copy of an anchored record.
    pub fn store_record(&self, record: Record) {
        let mut map = self.records.write().expect("lock poisoned");
        map.insert(record.id, record);
    }

    /// Read the gateway's copy of a record.
    pub fn record(&self, id: &RecordId) -> Option<Record> {
        let map = self.records.read().expect("lock poisoned");
        map.get(id).cloned()
    }

    /// Number of records the gateway holds.
    pub fn record_count(&self) -> usize {
        self.records.read().expect("lock poisoned").len()
    }
}

impl std::fmt::Debug for GatewayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayState")
            .field("config", &self.config)
            .field("record_count", &self.record_count())
            .finish()
    }
}

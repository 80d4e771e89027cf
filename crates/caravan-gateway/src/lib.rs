//! Anchoring gateway for Caravan.
//!
//! Receives batches of records from field clients, validates and anchors
//! each record independently to a content-addressed store and an
//! append-only ledger, and answers public verification queries against the
//! ledger. One record's failure never aborts its batch siblings.
//!
//! Re-submitting an already-anchored record (a client retry after a lost
//! response) is acknowledged with the *original* ledger reference instead
//! of producing a second entry: the gateway checks the ledger by integrity
//! hash before anchoring.

pub mod anchor;
pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod state;

pub use anchor::anchor_batch;
pub use config::GatewayConfig;
pub use error::{GatewayError, GatewayResult};
pub use router::build_router;
pub use server::Gateway;
pub use state::GatewayState;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::util::ServiceExt;

    use caravan_crypto::integrity_hash_of;
    use caravan_protocol::{AnchorCheck, SyncResponse};
    use caravan_types::{
        unix_millis, ActorId, IntegrityHash, OriginId, Record, RecordId, SubjectId, SyncStatus,
    };

    use super::*;

    fn test_state() -> Arc<GatewayState> {
        Arc::new(GatewayState::in_memory(GatewayConfig::default()))
    }

    fn record(subject: &str, content: &[u8]) -> Record {
        Record {
            id: RecordId::new(),
            subject_id: SubjectId::new(subject),
            author_id: ActorId::new("doctor-1"),
            origin_id: OriginId::new("clinic-1"),
            created_at: unix_millis(),
            payload: content.to_vec(),
            integrity_hash: integrity_hash_of(content),
            signature: vec![0xcd; 64],
            status: SyncStatus::Pending,
            content_ref: None,
            ledger_ref: None,
        }
    }

    async fn post_batch(state: &Arc<GatewayState>, records: &[Record]) -> SyncResponse {
        let app = build_router(Arc::clone(state));
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/v1/sync/records")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(serde_json::to_vec(records).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn get_verify(state: &Arc<GatewayState>, hash: &str) -> (StatusCode, Option<AnchorCheck>) {
        let app = build_router(Arc::clone(state));
        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/v1/verify/{hash}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).ok())
    }

    #[tokio::test]
    async fn health_endpoint() {
        let app = build_router(test_state());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/v1/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn info_endpoint() {
        let app = build_router(test_state());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/v1/info")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn sync_anchors_a_batch_over_http() {
        let state = test_state();
        let batch = vec![record("p1", b"visit one"), record("p2", b"visit two")];
        let response = post_batch(&state, &batch).await;

        assert!(response.success);
        assert_eq!(response.results.len(), 2);
        for receipt in &response.results {
            assert!(receipt.is_accepted());
            assert!(receipt.content_ref.is_some());
            assert!(receipt.ledger_ref.is_some());
        }
        assert_eq!(state.ledger().entry_count().unwrap(), 2);
    }

    #[tokio::test]
    async fn verify_round_trip_over_http() {
        let state = test_state();
        let r = record("p1", b"flu diagnosis");
        let hash = r.integrity_hash;
        post_batch(&state, &[r]).await;

        let (status, check) = get_verify(&state, &hash.to_hex()).await;
        assert_eq!(status, StatusCode::OK);
        let check = check.unwrap();
        assert!(check.valid);
        assert!(check.anchored_at.is_some());
    }

    #[tokio::test]
    async fn verify_unknown_hash_is_invalid() {
        let state = test_state();
        let unknown = integrity_hash_of(b"never anchored");
        let (status, check) = get_verify(&state, &unknown.to_hex()).await;
        assert_eq!(status, StatusCode::OK);
        assert!(!check.unwrap().valid);
    }

    #[tokio::test]
    async fn verify_malformed_hash_is_bad_request() {
        let state = test_state();
        let (status, _) = get_verify(&state, "not-hex").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn invalid_record_is_rejected_without_aborting_batch() {
        let state = test_state();
        let mut bad = record("p3", b"no hash");
        bad.integrity_hash = IntegrityHash::null();
        let batch = vec![record("p1", b"fine"), bad, record("p2", b"also fine")];

        let response = post_batch(&state, &batch).await;
        assert!(response.success);
        let accepted = response.results.iter().filter(|r| r.is_accepted()).count();
        assert_eq!(accepted, 2);
        assert_eq!(state.ledger().entry_count().unwrap(), 2);
    }

    #[tokio::test]
    async fn resubmitted_record_reuses_the_original_anchor() {
        let state = test_state();
        let r = record("p1", b"retried visit");

        let first = post_batch(&state, std::slice::from_ref(&r)).await;
        let second = post_batch(&state, &[r]).await;

        let first_ref = first.results[0].ledger_ref.unwrap();
        let second_ref = second.results[0].ledger_ref.unwrap();
        assert_eq!(first_ref, second_ref);
        // No second ledger entry for the same hash.
        assert_eq!(state.ledger().entry_count().unwrap(), 1);
    }

    /// Transport that hands batches straight to an in-process gateway,
    /// exercising the whole client/gateway contract without a socket.
    struct LoopbackTransport {
        state: Arc<GatewayState>,
    }

    #[async_trait::async_trait]
    impl caravan_sync::SyncTransport for LoopbackTransport {
        async fn upload_batch(
            &self,
            records: &[Record],
        ) -> caravan_sync::SyncResult<Vec<caravan_protocol::RecordReceipt>> {
            let response = anchor_batch(&self.state, records.to_vec());
            if !response.success {
                return Err(caravan_sync::SyncError::BatchRefused);
            }
            Ok(response.results)
        }

        async fn check_anchor(
            &self,
            hash: &IntegrityHash,
        ) -> caravan_sync::SyncResult<AnchorCheck> {
            Ok(match self.state.ledger().find_by_hash(hash) {
                Ok(Some((_, entry))) => AnchorCheck::anchored(entry.anchored_at),
                _ => AnchorCheck::unknown(),
            })
        }
    }

    fn field_device(
        dir: &tempfile::TempDir,
        state: &Arc<GatewayState>,
    ) -> caravan_queue::QueueManager<caravan_queue::FileRecordStore, LoopbackTransport> {
        let store =
            caravan_queue::FileRecordStore::open(dir.path().join("records.db")).unwrap();
        caravan_queue::QueueManager::new(
            store,
            LoopbackTransport {
                state: Arc::clone(state),
            },
            Box::new(caravan_queue::PassthroughEncryptor),
            caravan_crypto::SigningKey::generate(),
            caravan_queue::QueueConfig {
                author_id: ActorId::new("doctor-1"),
                origin_id: OriginId::new("clinic-1"),
            },
        )
    }

    #[tokio::test]
    async fn offline_capture_sync_and_verify_end_to_end() {
        let state = test_state();
        let dir = tempfile::tempdir().unwrap();
        let device = field_device(&dir, &state);

        let created = device
            .create_record(SubjectId::new("p1"), b"flu diagnosis")
            .await
            .unwrap();
        assert_eq!(created.status, SyncStatus::Pending);
        assert!(!created.integrity_hash.is_null());
        assert_eq!(device.pending_count().await.unwrap(), 1);

        let outcome = device.sync_now().await.unwrap();
        assert!(outcome.fully_acknowledged());
        assert_eq!(device.pending_count().await.unwrap(), 0);

        let synced = &device.records().await.unwrap()[0];
        assert_eq!(synced.status, SyncStatus::Synced);
        assert!(synced.content_ref.is_some());
        assert!(synced.ledger_ref.is_some());

        // Independent verification: the ledger confirms the hash without the
        // device's payload or subject id.
        let (_, entry) = state
            .ledger()
            .find_by_hash(&created.integrity_hash)
            .unwrap()
            .expect("anchored");
        assert_eq!(entry.record_hash, created.integrity_hash);

        // And the device can promote its copy to VERIFIED from that answer.
        assert_eq!(device.confirm_anchored().await.unwrap(), 1);
        assert_eq!(
            device.records().await.unwrap()[0].status,
            SyncStatus::Verified
        );
    }

    #[tokio::test]
    async fn client_retry_after_lost_response_does_not_duplicate() {
        let state = test_state();
        let dir = tempfile::tempdir().unwrap();
        let device = field_device(&dir, &state);

        let created = device
            .create_record(SubjectId::new("p1"), b"retried visit")
            .await
            .unwrap();

        // First attempt anchors server-side, but pretend the response was
        // lost: the local store still says PENDING.
        anchor_batch(&state, vec![created.clone()]);
        assert_eq!(device.pending_count().await.unwrap(), 1);

        // The retry re-sends the same record; the gateway must answer with
        // the original anchor instead of appending again.
        let outcome = device.sync_now().await.unwrap();
        assert!(outcome.fully_acknowledged());
        assert_eq!(
            state
                .ledger()
                .entries_for_hash(&created.integrity_hash)
                .unwrap()
                .len(),
            1
        );
        assert_eq!(device.pending_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn oversized_batch_is_refused_whole() {
        let config = GatewayConfig {
            max_batch_size: 2,
            ..GatewayConfig::default()
        };
        let state = Arc::new(GatewayState::in_memory(config));
        let batch = vec![
            record("p1", b"one"),
            record("p2", b"two"),
            record("p3", b"three"),
        ];

        let response = post_batch(&state, &batch).await;
        assert!(!response.success);
        assert!(response.results.is_empty());
        assert_eq!(state.ledger().entry_count().unwrap(), 0);
    }
}

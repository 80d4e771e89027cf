use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::json;

use caravan_protocol::{AnchorCheck, HealthResponse, SyncResponse, PROTOCOL_VERSION};
use caravan_types::{IntegrityHash, Record};

use crate::anchor::anchor_batch;
use crate::state::GatewayState;

/// Batch upload handler. Body is a JSON array of records; the response
/// carries one receipt per processed record.
pub async fn sync_handler(
    State(state): State<Arc<GatewayState>>,
    Json(records): Json<Vec<Record>>,
) -> Json<SyncResponse> {
    Json(anchor_batch(&state, records))
}

/// Public verification handler: pure read against the ledger.
///
/// Anyone holding a record hash can confirm the record was anchored,
/// without access to the device, the payload, or the subject.
pub async fn verify_handler(
    State(state): State<Arc<GatewayState>>,
    Path(record_hash): Path<String>,
) -> Result<Json<AnchorCheck>, StatusCode> {
    let hash = IntegrityHash::from_hex(&record_hash).map_err(|_| StatusCode::BAD_REQUEST)?;
    let check = match state.ledger().find_by_hash(&hash) {
        Ok(Some((_, entry))) => AnchorCheck::anchored(entry.anchored_at),
        Ok(None) => AnchorCheck::unknown(),
        Err(_) => return Err(StatusCode::INTERNAL_SERVER_ERROR),
    };
    Ok(Json(check))
}

/// Health check handler.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

/// Info handler.
pub async fn info_handler(State(state): State<Arc<GatewayState>>) -> Json<serde_json::Value> {
    Json(json!({
        "name": "caravan-gateway",
        "version": env!("CARGO_PKG_VERSION"),
        "protocol_version": PROTOCOL_VERSION,
        "records": state.record_count(),
    }))
}

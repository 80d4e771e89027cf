use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::handler;
use crate::state::GatewayState;

/// Build the axum router with all gateway endpoints.
pub fn build_router(state: Arc<GatewayState>) -> Router {
    Router::new()
        .route("/v1/sync/records", post(handler::sync_handler))
        .route("/v1/verify/:record_hash", get(handler::verify_handler))
        .route("/v1/health", get(handler::health_handler))
        .route("/v1/info", get(handler::info_handler))
        .with_state(state)
}

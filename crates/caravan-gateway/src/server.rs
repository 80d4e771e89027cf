use std::sync::Arc;

use tokio::net::TcpListener;

use crate::error::{GatewayError, GatewayResult};
use crate::router::build_router;
use crate::state::GatewayState;

/// Caravan anchoring gateway server.
pub struct Gateway {
    state: Arc<GatewayState>,
}

impl Gateway {
    pub fn new(state: GatewayState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }

    pub fn state(&self) -> &GatewayState {
        &self.state
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(Arc::clone(&self.state))
    }

    /// Start serving requests.
    pub async fn serve(self) -> GatewayResult<()> {
        let bind_addr = self.state.config().bind_addr;
        let app = self.router();
        let listener = TcpListener::bind(bind_addr).await?;
        tracing::info!("caravan gateway listening on {bind_addr}");
        axum::serve(listener, app)
            .await
            .map_err(|e| GatewayError::Internal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GatewayConfig;

    #[test]
    fn gateway_construction() {
        let gateway = Gateway::new(GatewayState::in_memory(GatewayConfig::default()));
        assert_eq!(
            gateway.state().config().bind_addr,
            "127.0.0.1:9410".parse().unwrap()
        );
    }

    #[test]
    fn router_builds() {
        let gateway = Gateway::new(GatewayState::in_memory(GatewayConfig::default()));
        let _router = gateway.router();
    }
}

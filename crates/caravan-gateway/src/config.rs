use std::net::SocketAddr;

use serde::{Deserialize, Serialize};

/// Gateway runtime configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,
    /// Largest record batch accepted in one upload; larger batches are
    /// refused whole.
    pub max_batch_size: usize,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:9410".parse().unwrap(),
            max_batch_size: 256,
        }
    }
}

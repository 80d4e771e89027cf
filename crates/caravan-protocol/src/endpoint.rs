/// HTTP endpoint paths exposed by the anchoring gateway.
pub mod endpoints {
    pub const SYNC_RECORDS: &str = "/v1/sync/records";
    pub const VERIFY: &str = "/v1/verify";
    pub const HEALTH: &str = "/v1/health";
    pub const INFO: &str = "/v1/info";

    /// Verification path for a specific record hash.
    pub fn verify_path(record_hash_hex: &str) -> String {
        format!("{VERIFY}/{record_hash_hex}")
    }
}

/// Health check response.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub protocol_version: u32,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            protocol_version: super::message::PROTOCOL_VERSION,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_response_defaults() {
        let h = HealthResponse::default();
        assert_eq!(h.status, "ok");
        assert_eq!(h.protocol_version, 1);
    }

    #[test]
    fn endpoint_paths() {
        assert_eq!(endpoints::SYNC_RECORDS, "/v1/sync/records");
        assert_eq!(endpoints::HEALTH, "/v1/health");
        assert_eq!(endpoints::verify_path("abcd"), "/v1/verify/abcd");
    }
}

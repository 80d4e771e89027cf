use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use caravan_protocol::{endpoints, AnchorCheck, RecordReceipt, SyncResponse};
use caravan_types::{IntegrityHash, Record};

use crate::error::{SyncError, SyncResult};
use crate::transport::SyncTransport;

/// Default request timeout. The offline-tolerance contract: a sync attempt
/// against an unreachable gateway returns a failure outcome instead of
/// hanging the caller.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP transport to an anchoring gateway.
pub struct HttpSyncTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSyncTransport {
    /// Create a transport with the default timeout.
    pub fn new(base_url: impl Into<String>) -> SyncResult<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a transport with an explicit request timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> SyncResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SyncError::Config(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// The gateway base URL this transport talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn map_request_error(e: reqwest::Error) -> SyncError {
    if e.is_timeout() {
        SyncError::Timeout
    } else if let Some(status) = e.status() {
        SyncError::Status {
            code: status.as_u16(),
        }
    } else if e.is_decode() {
        SyncError::Decode(e.to_string())
    } else {
        SyncError::Unreachable(e.to_string())
    }
}

#[async_trait]
impl SyncTransport for HttpSyncTransport {
    async fn upload_batch(&self, records: &[Record]) -> SyncResult<Vec<RecordReceipt>> {
        debug!(count = records.len(), "uploading record batch");
        let response = self
            .client
            .post(self.url(endpoints::SYNC_RECORDS))
            .json(records)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(map_request_error)?;

        let body: SyncResponse = response.json().await.map_err(map_request_error)?;
        if !body.success {
            return Err(SyncError::BatchRefused);
        }
        Ok(body.results)
    }

    async fn check_anchor(&self, hash: &IntegrityHash) -> SyncResult<AnchorCheck> {
        let response = self
            .client
            .get(self.url(&endpoints::verify_path(&hash.to_hex())))
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(map_request_error)?;

        response.json().await.map_err(map_request_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let t = HttpSyncTransport::new("http://gateway:9410/").unwrap();
        assert_eq!(t.base_url(), "http://gateway:9410");
        assert_eq!(t.url(endpoints::SYNC_RECORDS), "http://gateway:9410/v1/sync/records");
    }

    #[test]
    fn verify_url_includes_hash() {
        let t = HttpSyncTransport::new("http://gateway:9410").unwrap();
        let hash = IntegrityHash::from_hash([0xab; 32]);
        let url = t.url(&endpoints::verify_path(&hash.to_hex()));
        assert!(url.ends_with(&hash.to_hex()));
        assert!(url.contains("/v1/verify/"));
    }

    #[tokio::test]
    async fn unreachable_gateway_surfaces_as_transport_error() {
        // Nothing listens on this port; the attempt must fail fast with a
        // connect error, not hang.
        let t =
            HttpSyncTransport::with_timeout("http://127.0.0.1:1", Duration::from_secs(2)).unwrap();
        let err = t.upload_batch(&[]).await.unwrap_err();
        assert!(matches!(
            err,
            SyncError::Unreachable(_) | SyncError::Timeout
        ));
    }
}

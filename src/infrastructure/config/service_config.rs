use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// External order service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderServiceConfig {
    /// Base address of the order service
    pub base_url: String,

    /// Request timeout in seconds; a request exceeding it fails as a
    /// retrieval error
    pub request_timeout_secs: u64,
}

impl OrderServiceConfig {
    pub fn from_env() -> Arc<Self> {
        Arc::new(Self {
            base_url: std::env::var("ORDER_SERVICE_BASE_URL")
                .expect("ORDER_SERVICE_BASE_URL must be set"),
            request_timeout_secs: std::env::var("ORDER_SERVICE_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        })
    }

    pub fn new(base_url: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            base_url: base_url.into(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

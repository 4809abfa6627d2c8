//! Client configuration.
//!
//! The core never reads the environment; callers load a `ClientConfig`
//! however they like (it is serde-deserializable) and hand it to
//! `ProtoClient::from_config`.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Backend address used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:10110";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Host/port prefix every endpoint path is resolved against.
    pub base_url: String,
    /// Whole-exchange timeout in milliseconds. `None` waits indefinitely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_ms: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Absolute URL for `path`, joined to the base URL with a single `/`.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_stripped() {
        let config = ClientConfig::new("http://localhost:3000/");
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(
            config.endpoint("database/test-case/list"),
            "http://localhost:3000/database/test-case/list"
        );
    }

    #[test]
    fn endpoint_accepts_leading_slash() {
        let config = ClientConfig::new("http://localhost:3000");
        assert_eq!(
            config.endpoint("/database/suite/1"),
            "http://localhost:3000/database/suite/1"
        );
    }

    #[test]
    fn defaults_to_local_backend_without_timeout() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.timeout().is_none());
    }

    #[test]
    fn deserializes_with_missing_fields() {
        let config: ClientConfig = serde_json::from_str(r#"{"timeout_ms":5000}"#).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn serializes_without_unset_timeout() {
        let json = serde_json::to_value(ClientConfig::new("http://backend:8080")).unwrap();
        assert_eq!(json["base_url"], "http://backend:8080");
        assert!(json.get("timeout_ms").is_none());
    }

    #[test]
    fn sub_second_timeout_is_kept() {
        let config = ClientConfig::default().with_timeout(Duration::from_millis(500));
        assert_eq!(config.timeout_ms, Some(500));
        assert_eq!(config.timeout(), Some(Duration::from_millis(500)));
    }
}

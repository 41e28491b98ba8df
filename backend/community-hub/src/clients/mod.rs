//! REST clients for the generic user API and the follower proxy

pub mod api;
pub mod followers;

pub use api::ApiClient;
pub use followers::{FollowersClient, FollowersQuery, DEFAULT_PAGE, DEFAULT_RESULTS_PER_PAGE};

use reqwest::RequestBuilder;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Per-request options: extra headers, query parameters and a timeout
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestConfig {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl RequestConfig {
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_string(), value.to_string());
        self
    }

    pub fn param(mut self, name: &str, value: &str) -> Self {
        self.params.insert(name.to_string(), value.to_string());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(timeout.as_millis() as u64);
        self
    }

    pub(crate) fn apply(&self, mut request: RequestBuilder) -> RequestBuilder {
        for (name, value) in &self.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if !self.params.is_empty() {
            request = request.query(&self.params);
        }
        if let Some(ms) = self.timeout_ms {
            request = request.timeout(Duration::from_millis(ms));
        }
        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_config_wire_shape() {
        let config = RequestConfig::default()
            .header("Accept", "application/vnd.github+json")
            .timeout(Duration::from_secs(2));

        assert_eq!(
            serde_json::to_value(&config).unwrap(),
            json!({
                "headers": { "Accept": "application/vnd.github+json" },
                "timeoutMs": 2000
            })
        );
        assert_eq!(serde_json::to_value(RequestConfig::default()).unwrap(), json!({}));
    }
}

//! Client for the local follower proxy route
//!
//! The proxy calls the upstream follower API with its own credentials; this
//! client only ever talks to the proxy and holds no secrets.

use super::RequestConfig;
use crate::config::FollowersProxyConfig;
use crate::domain::models::FollowerResponse;
use crate::error::HubResult;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

pub const FOLLOWERS_ROUTE: &str = "/api/followers";
pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_RESULTS_PER_PAGE: u32 = 20;

/// Request body of `POST /api/followers`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowersQuery {
    pub uid: String,
    pub config: Option<RequestConfig>,
    pub page: u32,
    pub results_per_page: u32,
}

impl FollowersQuery {
    pub fn new(uid: &str) -> Self {
        Self {
            uid: uid.to_string(),
            config: None,
            page: DEFAULT_PAGE,
            results_per_page: DEFAULT_RESULTS_PER_PAGE,
        }
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn results_per_page(mut self, results_per_page: u32) -> Self {
        self.results_per_page = results_per_page;
        self
    }

    pub fn config(mut self, config: RequestConfig) -> Self {
        self.config = Some(config);
        self
    }
}

#[derive(Clone)]
pub struct FollowersClient {
    client: Client,
    base_url: String,
}

impl FollowersClient {
    pub fn new(client: Client, config: &FollowersProxyConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// First page of followers with default page size
    pub async fn get_followers(&self, github_user_id: &str) -> HubResult<FollowerResponse> {
        self.fetch(&FollowersQuery::new(github_user_id)).await
    }

    pub async fn fetch(&self, query: &FollowersQuery) -> HubResult<FollowerResponse> {
        let url = format!("{}{}", self.base_url, FOLLOWERS_ROUTE);
        let response = self
            .client
            .post(url)
            .json(query)
            .send()
            .await?
            .error_for_status()?
            .json::<FollowerResponse>()
            .await?;

        debug!(
            uid = %query.uid,
            page = query.page,
            count = response.followers.len(),
            "Fetched followers page"
        );
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_query_body() {
        let body = serde_json::to_value(FollowersQuery::new("42")).unwrap();
        assert_eq!(
            body,
            json!({ "uid": "42", "config": null, "page": 1, "resultsPerPage": 20 })
        );
    }

    #[test]
    fn test_query_builder() {
        let query = FollowersQuery::new("42").page(3).results_per_page(50);
        assert_eq!(query.page, 3);
        assert_eq!(query.results_per_page, 50);
        assert!(query.config.is_none());
    }
}

//! Client for the generic REST backend (GitHub-compatible user endpoints)

use super::RequestConfig;
use crate::config::ApiConfig;
use crate::domain::models::{Follower, GithubUser, IdParam};
use crate::error::HubResult;
use reqwest::{Client, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<Arc<SecretString>>,
}

impl ApiClient {
    pub fn new(client: Client, config: &ApiConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn users_url(&self, id: &str) -> String {
        format!("{}/users/{}", self.base_url, urlencoding::encode(id))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        }
    }

    /// `GET /users/{id}`; the payload is returned as the backend sent it.
    /// A list of ids fails before any request goes out.
    pub async fn get_user(
        &self,
        id: impl Into<IdParam>,
        config: Option<&RequestConfig>,
    ) -> HubResult<GithubUser> {
        let id: IdParam = id.into();
        let id = id.single()?;

        let mut request = self.authorize(self.client.get(self.users_url(id)));
        if let Some(config) = config {
            request = config.apply(request);
        }

        let user = request
            .send()
            .await?
            .error_for_status()?
            .json::<GithubUser>()
            .await?;

        debug!(user = %user.login, "Fetched user");
        Ok(user)
    }

    /// `GET /users/{login}/followers`, first page as served by the backend
    pub async fn get_user_followers(&self, login: &str) -> HubResult<Vec<Follower>> {
        let url = format!("{}/followers", self.users_url(login));
        let followers = self
            .authorize(self.client.get(url))
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<Follower>>()
            .await?;

        debug!(user = login, count = followers.len(), "Fetched user followers");
        Ok(followers)
    }
}

//! Access-layer facade
//!
//! `HubClient` is the one handle callers hold. Every method is a single
//! request/response exchange with one backend; nothing is retried or cached.

use crate::clients::{ApiClient, FollowersClient, FollowersQuery, RequestConfig};
use crate::config::Config;
use crate::domain::models::{
    Community, Follower, FollowerResponse, GithubUser, IdParam, NewCommunity, Post,
};
use crate::error::{HubError, HubResult};
use crate::repository::{CommunityRepository, PostRepository};
use crate::store::{DocumentRef, DocumentStore, FirestoreStore};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct HubClient {
    posts: PostRepository,
    communities: CommunityRepository,
    api: ApiClient,
    followers: FollowersClient,
}

impl HubClient {
    /// Assemble from injected parts, e.g. a [`crate::store::MemoryStore`] in tests
    pub fn new(store: Arc<dyn DocumentStore>, api: ApiClient, followers: FollowersClient) -> Self {
        Self {
            posts: PostRepository::new(store.clone()),
            communities: CommunityRepository::new(store),
            api,
            followers,
        }
    }

    /// Wire the Firestore store and both REST clients over one shared HTTP client
    pub fn from_config(config: &Config) -> HubResult<Self> {
        let client = config
            .http
            .build_client()
            .map_err(|e| HubError::Config(format!("{:#}", e)))?;

        let store = FirestoreStore::new(client.clone(), &config.firestore);
        info!(
            env = %config.app.env,
            documents = %store.documents_url(),
            api = %config.api.base_url,
            followers = %config.followers.base_url,
            "Community hub client configured"
        );

        Ok(Self::new(
            Arc::new(store),
            ApiClient::new(client.clone(), &config.api),
            FollowersClient::new(client, &config.followers),
        ))
    }

    pub fn posts(&self) -> &PostRepository {
        &self.posts
    }

    pub fn communities(&self) -> &CommunityRepository {
        &self.communities
    }

    pub async fn get_posts(&self) -> HubResult<Vec<Post>> {
        self.posts.get_posts().await
    }

    pub async fn create_post(&self, post: &Post) -> HubResult<()> {
        self.posts.create_post(post).await
    }

    pub async fn get_post(&self, post_id: impl Into<IdParam>) -> HubResult<Post> {
        self.posts.get_post(post_id).await
    }

    pub async fn toggle_like(
        &self,
        post_id: &str,
        current_likes: i64,
        has_liked: bool,
    ) -> HubResult<i64> {
        self.posts
            .toggle_like(post_id, current_likes, has_liked)
            .await
    }

    pub async fn get_communities(&self) -> HubResult<Vec<Community>> {
        self.communities.get_communities().await
    }

    pub async fn create_community(&self, community: &NewCommunity) -> HubResult<DocumentRef> {
        self.communities.create_community(community).await
    }

    pub async fn get_community(&self, reference: &DocumentRef) -> HubResult<Option<Community>> {
        self.communities.get_community(reference).await
    }

    pub async fn get_user(
        &self,
        id: impl Into<IdParam>,
        config: Option<&RequestConfig>,
    ) -> HubResult<GithubUser> {
        self.api.get_user(id, config).await
    }

    pub async fn get_user_followers(&self, login: &str) -> HubResult<Vec<Follower>> {
        self.api.get_user_followers(login).await
    }

    /// Followers through the proxy with `page = 1`, `resultsPerPage = 20`
    pub async fn get_followers(&self, github_user_id: &str) -> HubResult<FollowerResponse> {
        self.followers.get_followers(github_user_id).await
    }

    pub async fn fetch_followers(&self, query: &FollowersQuery) -> HubResult<FollowerResponse> {
        self.followers.fetch(query).await
    }
}

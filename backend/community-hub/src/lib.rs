//! Community Hub access layer
//!
//! Sits between the hub's callers and two backends: a document store holding
//! `posts` and `communities`, and REST endpoints for user and follower lookups.
//! Backend response shapes are validated and normalised here; callers only see
//! the types in [`domain`].

pub mod clients;
pub mod config;
pub mod domain;
pub mod error;
pub mod hub;
pub mod repository;
pub mod store;
pub mod telemetry;

pub use clients::{ApiClient, FollowersClient, FollowersQuery, RequestConfig};
pub use config::Config;
pub use domain::{
    Community, Follower, FollowerResponse, GithubUser, IdParam, NewCommunity, NewPost, Post,
};
pub use error::{HubError, HubResult, StoreError};
pub use hub::HubClient;
pub use repository::{CommunityRepository, PostRepository};
pub use store::{DocumentRef, DocumentStore, FirestoreStore, MemoryStore};

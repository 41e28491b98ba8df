//! Shared fixtures for community-hub integration tests
#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use community_hub::config::{ApiConfig, FirestoreConfig, FollowersProxyConfig};
use community_hub::error::StoreError;
use community_hub::store::{DocumentRef, DocumentStore, Fields, OrderBy, StoredDocument, Value};
use community_hub::{ApiClient, FollowersClient, HubClient, MemoryStore};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub fn instant(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
}

/// Raw post document as the store would hold it
pub fn post_fields(author: &str, content: &str, likes: i64, created_at: Value) -> Fields {
    let mut fields = Fields::new();
    fields.insert("author".to_string(), Value::from(author));
    fields.insert("content".to_string(), Value::from(content));
    fields.insert("likes".to_string(), Value::Integer(likes));
    fields.insert("createdAt".to_string(), created_at);
    fields
}

pub fn api_client(base_url: &str) -> ApiClient {
    ApiClient::new(
        reqwest::Client::new(),
        &ApiConfig {
            base_url: base_url.to_string(),
            token: None,
        },
    )
}

pub fn followers_client(base_url: &str) -> FollowersClient {
    FollowersClient::new(
        reqwest::Client::new(),
        &FollowersProxyConfig {
            base_url: base_url.to_string(),
        },
    )
}

pub fn firestore_config(base_url: &str) -> FirestoreConfig {
    FirestoreConfig {
        project_id: "demo".to_string(),
        database: "hub-test".to_string(),
        base_url: base_url.to_string(),
        token: None,
    }
}

/// Hub over an in-memory store; REST clients point at an unroutable address
pub fn memory_hub() -> (HubClient, MemoryStore) {
    let store = MemoryStore::new();
    let hub = HubClient::new(
        Arc::new(store.clone()),
        api_client("http://127.0.0.1:9"),
        followers_client("http://127.0.0.1:9"),
    );
    (hub, store)
}

/// Store double that rejects every call with the same error and counts calls
#[derive(Default)]
pub struct FailingStore {
    pub calls: AtomicUsize,
}

impl FailingStore {
    fn fail(&self) -> StoreError {
        self.calls.fetch_add(1, Ordering::SeqCst);
        StoreError::Status {
            code: 403,
            message: "Missing or insufficient permissions.".to_string(),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl DocumentStore for FailingStore {
    async fn query(
        &self,
        _collection: &str,
        _order_by: Option<&OrderBy>,
    ) -> Result<Vec<StoredDocument>, StoreError> {
        Err(self.fail())
    }

    async fn get(&self, _collection: &str, _id: &str) -> Result<Option<StoredDocument>, StoreError> {
        Err(self.fail())
    }

    async fn set(&self, _collection: &str, _id: &str, _fields: Fields) -> Result<(), StoreError> {
        Err(self.fail())
    }

    async fn update(&self, _collection: &str, _id: &str, _fields: Fields) -> Result<(), StoreError> {
        Err(self.fail())
    }

    async fn add(&self, _collection: &str, _fields: Fields) -> Result<DocumentRef, StoreError> {
        Err(self.fail())
    }
}

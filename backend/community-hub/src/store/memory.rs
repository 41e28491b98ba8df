//! In-process document store
//!
//! Same semantics as the hosted store for the operations the hub uses:
//! default order is by document id, `orderBy` skips documents missing the
//! field, `update` requires an existing document.

use super::{auto_id, Direction, DocumentRef, DocumentStore, Fields, OrderBy, StoredDocument};
use crate::error::StoreError;
use dashmap::DashMap;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// collection -> (document id -> fields)
#[derive(Clone, Default)]
pub struct MemoryStore {
    collections: Arc<DashMap<String, BTreeMap<String, Fields>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in a collection
    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .get(collection)
            .map(|docs| docs.len())
            .unwrap_or(0)
    }

    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }
}

#[async_trait::async_trait]
impl DocumentStore for MemoryStore {
    async fn query(
        &self,
        collection: &str,
        order_by: Option<&OrderBy>,
    ) -> Result<Vec<StoredDocument>, StoreError> {
        let mut documents: Vec<StoredDocument> = self
            .collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .map(|(id, fields)| StoredDocument {
                        id: id.clone(),
                        fields: fields.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        if let Some(order) = order_by {
            documents.retain(|doc| doc.fields.contains_key(&order.field));
            documents.sort_by(|a, b| {
                let ord = a.fields[&order.field].order_cmp(&b.fields[&order.field]);
                match order.direction {
                    Direction::Ascending => ord,
                    Direction::Descending => ord.reverse(),
                }
            });
        }

        debug!(collection, count = documents.len(), "memory query");
        Ok(documents)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<StoredDocument>, StoreError> {
        Ok(self.collections.get(collection).and_then(|docs| {
            docs.get(id).map(|fields| StoredDocument {
                id: id.to_string(),
                fields: fields.clone(),
            })
        }))
    }

    async fn set(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        self.collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), fields);
        Ok(())
    }

    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        let mut docs = self
            .collections
            .get_mut(collection)
            .ok_or_else(|| StoreError::not_found(collection, id))?;
        let existing = docs
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found(collection, id))?;
        existing.extend(fields);
        Ok(())
    }

    async fn add(&self, collection: &str, fields: Fields) -> Result<DocumentRef, StoreError> {
        let id = auto_id();
        self.set(collection, &id, fields).await?;
        Ok(DocumentRef::new(collection, &id))
    }
}

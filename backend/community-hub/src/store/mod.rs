//! Document store seam
//!
//! Repositories talk to a [`DocumentStore`]; the Firestore REST backend and the
//! in-process [`MemoryStore`] both implement it, so callers can swap one for
//! the other without touching repository code.

pub mod firestore;
pub mod memory;
pub mod value;

use crate::error::StoreError;
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use firestore::FirestoreStore;
pub use memory::MemoryStore;
pub use value::{Fields, Value};

/// Length of store-generated document ids
pub const AUTO_ID_LEN: usize = 20;

/// A document read back from a collection
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: String,
    pub fields: Fields,
}

/// Opaque handle to a document location, not a copy of its data
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentRef {
    pub collection: String,
    pub id: String,
}

impl DocumentRef {
    pub fn new(collection: &str, id: &str) -> Self {
        Self {
            collection: collection.to_string(),
            id: id.to_string(),
        }
    }

    /// Path relative to the database root, e.g. `communities/abc`
    pub fn path(&self) -> String {
        format!("{}/{}", self.collection, self.id)
    }
}

impl fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Ascending => "ASCENDING",
            Direction::Descending => "DESCENDING",
        }
    }
}

/// Single-field ordering pushed down to the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

impl OrderBy {
    pub fn ascending(field: &str) -> Self {
        Self {
            field: field.to_string(),
            direction: Direction::Ascending,
        }
    }

    pub fn descending(field: &str) -> Self {
        Self {
            field: field.to_string(),
            direction: Direction::Descending,
        }
    }
}

/// CRUD over named collections of schema-flexible documents.
///
/// Single-document writes are atomic; nothing spans more than one call.
#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync {
    /// All documents of a collection, optionally ordered by one field.
    /// Without an ordering the store's default (document id) order applies.
    async fn query(
        &self,
        collection: &str,
        order_by: Option<&OrderBy>,
    ) -> Result<Vec<StoredDocument>, StoreError>;

    /// Read one document, `None` if it does not exist
    async fn get(&self, collection: &str, id: &str) -> Result<Option<StoredDocument>, StoreError>;

    /// Create or fully replace the document at `id`
    async fn set(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError>;

    /// Overwrite the given fields of an existing document.
    /// Fails with [`StoreError::NotFound`] when the document is missing.
    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError>;

    /// Insert a new document under a fresh [`auto_id`]
    async fn add(&self, collection: &str, fields: Fields) -> Result<DocumentRef, StoreError>;
}

/// Random alphanumeric document id in the store's auto-id format
pub fn auto_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(AUTO_ID_LEN)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_id_format() {
        let id = auto_id();
        assert_eq!(id.len(), AUTO_ID_LEN);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(id, auto_id());
    }

    #[test]
    fn test_document_ref_path() {
        let reference = DocumentRef::new("communities", "abc");
        assert_eq!(reference.path(), "communities/abc");
        assert_eq!(reference.to_string(), "communities/abc");
    }
}

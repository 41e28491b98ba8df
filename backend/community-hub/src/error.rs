/// Error types for community-hub
use thiserror::Error;

/// Message returned when a route parameter arrives as a list instead of a single id.
pub const MULTIPLE_IDS_MESSAGE: &str = "Could not perform this operation";

/// Errors raised by a document store backend.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Store returned {code}: {message}")]
    Status { code: u16, message: String },

    #[error("Document not found: {collection}/{id}")]
    NotFound { collection: String, id: String },

    #[error("Store decode error: {0}")]
    Decode(String),
}

impl StoreError {
    pub fn not_found(collection: &str, id: &str) -> Self {
        StoreError::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum HubError {
    /// Store failures pass through untouched
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Transport failures from the REST backends pass through untouched
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid document {collection}/{id}: {reason}")]
    InvalidDocument {
        collection: String,
        id: String,
        reason: String,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl HubError {
    pub fn multiple_ids() -> Self {
        HubError::InvalidInput(MULTIPLE_IDS_MESSAGE.to_string())
    }

    pub fn invalid_document(collection: &str, id: &str, reason: impl Into<String>) -> Self {
        HubError::InvalidDocument {
            collection: collection.to_string(),
            id: id.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether the error came out of the document store
    pub fn is_store_error(&self) -> bool {
        matches!(self, HubError::Store(_))
    }
}

/// Result type alias for access-layer operations
pub type HubResult<T> = Result<T, HubError>;

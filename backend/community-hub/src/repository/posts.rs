use crate::domain::models::{to_iso_string, IdParam, Post};
use crate::error::{HubError, HubResult};
use crate::store::{DocumentStore, Fields, OrderBy, StoredDocument, Value};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::{required_string, POSTS_COLLECTION};

const CREATED_AT: &str = "createdAt";
const LIKES: &str = "likes";

/// Repository for feed posts
#[derive(Clone)]
pub struct PostRepository {
    store: Arc<dyn DocumentStore>,
}

impl PostRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// All posts, newest first. Posts without `createdAt` are not matched by
    /// the ordered query and are left out.
    pub async fn get_posts(&self) -> HubResult<Vec<Post>> {
        let documents = self
            .store
            .query(POSTS_COLLECTION, Some(&OrderBy::descending(CREATED_AT)))
            .await?;

        debug!(count = documents.len(), "Fetched posts");
        documents.into_iter().map(post_from_document).collect()
    }

    /// Upsert a post at its own id
    pub async fn create_post(&self, post: &Post) -> HubResult<()> {
        if post.id.is_empty() {
            return Err(HubError::InvalidInput("post id must not be empty".to_string()));
        }

        let fields = post_to_fields(post)?;
        self.store.set(POSTS_COLLECTION, &post.id, fields).await?;

        info!(post_id = %post.id, author = %post.author, "Post stored");
        Ok(())
    }

    /// Fetch one post. A list of ids is rejected before the store is contacted.
    pub async fn get_post(&self, post_id: impl Into<IdParam>) -> HubResult<Post> {
        let post_id: IdParam = post_id.into();
        let post_id = post_id.single()?;

        let document = self
            .store
            .get(POSTS_COLLECTION, post_id)
            .await?
            .ok_or_else(|| HubError::NotFound(format!("{}/{}", POSTS_COLLECTION, post_id)))?;

        post_from_document(document)
    }

    /// Write `likes` from a caller-supplied current count.
    ///
    /// The new count is computed here rather than incremented by the store, so
    /// two overlapping toggles built from the same `current_likes` lose one write.
    pub async fn toggle_like(
        &self,
        post_id: &str,
        current_likes: i64,
        has_liked: bool,
    ) -> HubResult<i64> {
        let likes = next_like_count(current_likes, has_liked);

        let mut fields = Fields::new();
        fields.insert(LIKES.to_string(), Value::Integer(likes));
        self.store.update(POSTS_COLLECTION, post_id, fields).await?;

        info!(post_id, likes, has_liked, "Post likes updated");
        Ok(likes)
    }
}

/// `current - 1` when the caller already liked the post, `current + 1` otherwise
pub fn next_like_count(current_likes: i64, has_liked: bool) -> i64 {
    if has_liked {
        current_likes.saturating_sub(1)
    } else {
        current_likes.saturating_add(1)
    }
}

fn post_from_document(document: StoredDocument) -> HubResult<Post> {
    let StoredDocument { id, fields } = document;

    let created_at = match fields.get(CREATED_AT) {
        Some(Value::Timestamp(ts)) => to_iso_string(*ts),
        Some(other) => {
            warn!(post_id = %id, kind = other.type_name(), "Post createdAt is not a timestamp");
            return Err(HubError::invalid_document(
                POSTS_COLLECTION,
                &id,
                format!("createdAt is a {}, expected timestamp", other.type_name()),
            ));
        }
        None => {
            return Err(HubError::invalid_document(
                POSTS_COLLECTION,
                &id,
                "missing createdAt",
            ))
        }
    };

    let likes = match fields.get(LIKES) {
        Some(Value::Integer(n)) => *n,
        Some(other) => {
            return Err(HubError::invalid_document(
                POSTS_COLLECTION,
                &id,
                format!("likes is a {}, expected integer", other.type_name()),
            ))
        }
        None => return Err(HubError::invalid_document(POSTS_COLLECTION, &id, "missing likes")),
    };

    Ok(Post {
        author: required_string(&fields, POSTS_COLLECTION, &id, "author")?,
        content: required_string(&fields, POSTS_COLLECTION, &id, "content")?,
        likes,
        created_at,
        id,
    })
}

fn post_to_fields(post: &Post) -> HubResult<Fields> {
    let created_at = post.created_at_instant()?;

    let mut fields = Fields::new();
    fields.insert("id".to_string(), Value::from(post.id.as_str()));
    fields.insert("author".to_string(), Value::from(post.author.as_str()));
    fields.insert("content".to_string(), Value::from(post.content.as_str()));
    fields.insert(LIKES.to_string(), Value::Integer(post.likes));
    fields.insert(CREATED_AT.to_string(), Value::Timestamp(created_at));
    Ok(fields)
}

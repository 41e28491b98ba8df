use crate::domain::models::{Community, NewCommunity};
use crate::error::{HubError, HubResult};
use crate::store::{DocumentRef, DocumentStore, Fields, StoredDocument, Value};
use std::sync::Arc;
use tracing::{debug, info};

use super::{required_string, COMMUNITIES_COLLECTION};

/// Repository for communities
#[derive(Clone)]
pub struct CommunityRepository {
    store: Arc<dyn DocumentStore>,
}

impl CommunityRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// All communities in the store's default order
    pub async fn get_communities(&self) -> HubResult<Vec<Community>> {
        let documents = self.store.query(COMMUNITIES_COLLECTION, None).await?;

        debug!(count = documents.len(), "Fetched communities");
        documents.into_iter().map(community_from_document).collect()
    }

    /// Insert a community under a store-generated id and return its reference
    pub async fn create_community(&self, community: &NewCommunity) -> HubResult<DocumentRef> {
        let mut fields = Fields::new();
        fields.insert("name".to_string(), Value::from(community.name.as_str()));
        fields.insert("imageUrl".to_string(), Value::from(community.image_url.as_str()));
        fields.insert(
            "creatorSlug".to_string(),
            Value::from(community.creator_slug.as_str()),
        );

        let reference = self.store.add(COMMUNITIES_COLLECTION, fields).await?;

        info!(%reference, name = %community.name, "Community created");
        Ok(reference)
    }

    /// Read a community back through the reference returned by `create_community`
    pub async fn get_community(&self, reference: &DocumentRef) -> HubResult<Option<Community>> {
        if reference.collection != COMMUNITIES_COLLECTION {
            return Err(HubError::InvalidInput(format!(
                "{} is not a community reference",
                reference
            )));
        }

        self.store
            .get(COMMUNITIES_COLLECTION, &reference.id)
            .await?
            .map(community_from_document)
            .transpose()
    }
}

fn community_from_document(document: StoredDocument) -> HubResult<Community> {
    let StoredDocument { id, fields } = document;

    Ok(Community {
        name: required_string(&fields, COMMUNITIES_COLLECTION, &id, "name")?,
        image_url: required_string(&fields, COMMUNITIES_COLLECTION, &id, "imageUrl")?,
        creator_slug: required_string(&fields, COMMUNITIES_COLLECTION, &id, "creatorSlug")?,
        id,
    })
}

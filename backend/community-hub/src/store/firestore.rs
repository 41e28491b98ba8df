//! Firestore REST (v1) backend for [`DocumentStore`]

use super::{auto_id, DocumentRef, DocumentStore, Fields, OrderBy, StoredDocument};
use crate::config::FirestoreConfig;
use crate::error::StoreError;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

pub struct FirestoreStore {
    client: Client,
    /// `{base}/v1/projects/{project}/databases/{database}/documents`
    documents_url: String,
    token: Option<Arc<SecretString>>,
}

#[derive(Debug, Deserialize)]
struct Document {
    name: String,
    #[serde(default)]
    fields: Fields,
}

impl Document {
    fn into_stored(self) -> StoredDocument {
        let id = document_id(&self.name).to_string();
        StoredDocument {
            id,
            fields: self.fields,
        }
    }
}

#[derive(Serialize)]
struct WriteBody<'a> {
    fields: &'a Fields,
}

#[derive(Debug, Deserialize)]
struct RunQueryItem {
    #[serde(default)]
    document: Option<Document>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// Last path segment of a full document name
fn document_id(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

impl FirestoreStore {
    pub fn new(client: Client, config: &FirestoreConfig) -> Self {
        let documents_url = format!(
            "{}/v1/projects/{}/databases/{}/documents",
            config.base_url.trim_end_matches('/'),
            config.project_id,
            config.database
        );
        Self {
            client,
            documents_url,
            token: config.token.clone(),
        }
    }

    pub fn documents_url(&self) -> &str {
        &self.documents_url
    }

    fn document_url(&self, collection: &str, id: &str) -> String {
        format!(
            "{}/{}/{}",
            self.documents_url,
            urlencoding::encode(collection),
            urlencoding::encode(id)
        )
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        }
    }

    /// Turn a non-success response into [`StoreError::Status`], keeping the store's message
    async fn check(response: Response) -> Result<Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorEnvelope>(&body)
            .map(|envelope| envelope.error.message)
            .unwrap_or(body);
        Err(StoreError::Status {
            code: status.as_u16(),
            message,
        })
    }

    async fn decode<T: for<'de> Deserialize<'de>>(response: Response) -> Result<T, StoreError> {
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| StoreError::Decode(e.to_string()))
    }
}

#[async_trait::async_trait]
impl DocumentStore for FirestoreStore {
    async fn query(
        &self,
        collection: &str,
        order_by: Option<&OrderBy>,
    ) -> Result<Vec<StoredDocument>, StoreError> {
        let mut structured_query = json!({
            "from": [{ "collectionId": collection }],
        });
        if let Some(order) = order_by {
            structured_query["orderBy"] = json!([{
                "field": { "fieldPath": order.field },
                "direction": order.direction.as_str(),
            }]);
        }

        let url = format!("{}:runQuery", self.documents_url);
        let response = self
            .authorize(self.client.post(&url))
            .json(&json!({ "structuredQuery": structured_query }))
            .send()
            .await?;
        let items: Vec<RunQueryItem> = Self::decode(Self::check(response).await?).await?;

        let documents: Vec<StoredDocument> = items
            .into_iter()
            .filter_map(|item| item.document)
            .map(Document::into_stored)
            .collect();

        debug!(collection, count = documents.len(), "firestore runQuery");
        Ok(documents)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<StoredDocument>, StoreError> {
        let response = self
            .authorize(self.client.get(self.document_url(collection, id)))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            debug!(collection, id, "firestore get: missing");
            return Ok(None);
        }

        let document: Document = Self::decode(Self::check(response).await?).await?;
        debug!(collection, id, "firestore get");
        Ok(Some(document.into_stored()))
    }

    async fn set(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        let response = self
            .authorize(self.client.patch(self.document_url(collection, id)))
            .json(&WriteBody { fields: &fields })
            .send()
            .await?;
        Self::check(response).await?;

        debug!(collection, id, "firestore set");
        Ok(())
    }

    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        let mut params: Vec<(&str, &str)> = fields
            .keys()
            .map(|path| ("updateMask.fieldPaths", path.as_str()))
            .collect();
        params.push(("currentDocument.exists", "true"));

        let response = self
            .authorize(self.client.patch(self.document_url(collection, id)))
            .query(&params)
            .json(&WriteBody { fields: &fields })
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(StoreError::not_found(collection, id));
        }
        Self::check(response).await?;

        debug!(collection, id, fields = fields.len(), "firestore update");
        Ok(())
    }

    async fn add(&self, collection: &str, fields: Fields) -> Result<DocumentRef, StoreError> {
        let url = format!("{}/{}", self.documents_url, urlencoding::encode(collection));
        // ids are generated client-side, like the store SDKs do
        let id = auto_id();
        let response = self
            .authorize(self.client.post(&url))
            .query(&[("documentId", id.as_str())])
            .json(&WriteBody { fields: &fields })
            .send()
            .await?;
        let document: Document = Self::decode(Self::check(response).await?).await?;

        let reference = DocumentRef::new(collection, document_id(&document.name));
        debug!(%reference, "firestore add");
        Ok(reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_id_from_name() {
        assert_eq!(
            document_id("projects/p/databases/(default)/documents/posts/abc"),
            "abc"
        );
        assert_eq!(document_id("abc"), "abc");
    }
}

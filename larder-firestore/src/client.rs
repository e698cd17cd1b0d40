use larder_core::{AsyncDocumentStore, ItemDocument};
use reqwest::{Method, RequestBuilder, StatusCode, Url};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::convert::{api_error_message, build_document_body, parse_document, parse_list_page};
use crate::error::FirestoreError;

const DEFAULT_BASE_URL: &str = "https://firestore.googleapis.com/v1";
const PAGE_SIZE: &str = "300";

pub const DEFAULT_COLLECTION: &str = "inventory";

/// A Cloud Firestore collection exposed as an `AsyncDocumentStore`.
///
/// Talks to the REST API. Writes are `PATCH` requests without an update
/// mask, which replace the whole document.
pub struct FirestoreStore {
    http: reqwest::Client,
    base_url: String,
    project_id: String,
    collection: String,
    api_key: Option<String>,
}

impl FirestoreStore {
    /// Creates a store for `collection` in the default database of `project_id`.
    pub fn new(project_id: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            project_id: project_id.into(),
            collection: collection.into(),
            api_key: None,
        }
    }

    /// Sends a web API key with every request.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Points the store at a different host (e.g., the local emulator).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    fn collection_url(&self) -> Result<Url, FirestoreError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|e| FirestoreError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| FirestoreError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend([
                "projects",
                self.project_id.as_str(),
                "databases",
                "(default)",
                "documents",
                self.collection.as_str(),
            ]);
        Ok(url)
    }

    fn document_url(&self, key: &str) -> Result<Url, FirestoreError> {
        let mut url = self.collection_url()?;
        url.path_segments_mut()
            .map_err(|_| FirestoreError::InvalidUrl(self.base_url.clone()))?
            .push(key);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let request = self.http.request(method, url);
        match &self.api_key {
            Some(key) => request.query(&[("key", key.as_str())]),
            None => request,
        }
    }
}

impl AsyncDocumentStore for FirestoreStore {
    type Error = FirestoreError;

    #[instrument(skip(self), fields(collection = %self.collection))]
    async fn async_list(&self) -> Result<Vec<(String, ItemDocument)>, Self::Error> {
        let url = self.collection_url()?;
        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self
                .request(Method::GET, url.clone())
                .query(&[("pageSize", PAGE_SIZE)]);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }

            let body = read_json(request.send().await?).await?;
            let (page, next) = parse_list_page(&body)?;
            debug!(count = page.len(), "Received document page");
            documents.extend(page);

            match next {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(documents)
    }

    #[instrument(skip(self), fields(collection = %self.collection))]
    async fn async_get(&self, key: &str) -> Result<Option<ItemDocument>, Self::Error> {
        let response = self
            .request(Method::GET, self.document_url(key)?)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!("Document not found");
            return Ok(None);
        }

        let body = read_json(response).await?;
        let (_, doc) = parse_document(&body)?;
        Ok(Some(doc))
    }

    #[instrument(skip(self, document), fields(collection = %self.collection))]
    async fn async_put(&self, key: &str, document: &ItemDocument) -> Result<(), Self::Error> {
        let response = self
            .request(Method::PATCH, self.document_url(key)?)
            .json(&build_document_body(document))
            .send()
            .await?;

        read_json(response).await?;
        debug!(quantity = document.quantity, "Document written");
        Ok(())
    }

    #[instrument(skip(self), fields(collection = %self.collection))]
    async fn async_delete(&self, key: &str) -> Result<(), Self::Error> {
        let response = self
            .request(Method::DELETE, self.document_url(key)?)
            .send()
            .await?;

        read_json(response).await?;
        debug!("Document deleted");
        Ok(())
    }
}

async fn read_json(response: reqwest::Response) -> Result<Value, FirestoreError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(FirestoreError::Api {
            status: status.as_u16(),
            message: api_error_message(&body),
        });
    }

    if body.trim().is_empty() {
        return Ok(Value::Object(Default::default()));
    }
    Ok(serde_json::from_str(&body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_url_layout() {
        let store = FirestoreStore::new("pantry-demo", DEFAULT_COLLECTION);

        let url = store.document_url("milk").unwrap();

        assert_eq!(
            url.as_str(),
            "https://firestore.googleapis.com/v1/projects/pantry-demo/databases/(default)/documents/inventory/milk"
        );
    }

    #[test]
    fn document_ids_are_escaped() {
        let store = FirestoreStore::new("pantry-demo", DEFAULT_COLLECTION)
            .with_base_url("http://localhost:8080/");

        let url = store.document_url("olive oil").unwrap();

        assert_eq!(
            url.path(),
            "/projects/pantry-demo/databases/(default)/documents/inventory/olive%20oil"
        );
    }

    #[test]
    fn invalid_base_url() {
        let store = FirestoreStore::new("p", "c").with_base_url("not a url");

        assert!(matches!(
            store.collection_url(),
            Err(FirestoreError::InvalidUrl(_))
        ));
    }
}

use std::future::Future;

use crate::DocumentStore;
use crate::item::ItemDocument;

/// Async document store.
///
/// Mirrors the `DocumentStore` trait but with async methods, enabling
/// network-backed implementations (e.g., a hosted document database). Methods
/// are prefixed with `async_` to avoid name collisions when a type implements
/// both `DocumentStore` and `AsyncDocumentStore`.
pub trait AsyncDocumentStore: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    fn async_list(
        &self,
    ) -> impl Future<Output = Result<Vec<(String, ItemDocument)>, Self::Error>> + Send;
    fn async_get(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<ItemDocument>, Self::Error>> + Send;
    fn async_put(
        &self,
        key: &str,
        document: &ItemDocument,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;
    fn async_delete(&self, key: &str) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

/// Blanket impl: any sync `DocumentStore` is also an `AsyncDocumentStore`.
impl<S: DocumentStore + Send + Sync> AsyncDocumentStore for S {
    type Error = S::Error;

    async fn async_list(&self) -> Result<Vec<(String, ItemDocument)>, Self::Error> {
        self.list()
    }

    async fn async_get(&self, key: &str) -> Result<Option<ItemDocument>, Self::Error> {
        self.get(key)
    }

    async fn async_put(&self, key: &str, document: &ItemDocument) -> Result<(), Self::Error> {
        self.put(key, document)
    }

    async fn async_delete(&self, key: &str) -> Result<(), Self::Error> {
        self.delete(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;

    #[tokio::test]
    async fn store_as_async_store_basic() {
        let store = MemoryStore::new();
        let doc = ItemDocument::new(4, None);

        store.async_put("rice", &doc).await.unwrap();
        assert_eq!(store.async_get("rice").await.unwrap(), Some(doc.clone()));
        assert_eq!(
            store.async_list().await.unwrap(),
            vec![("rice".to_string(), doc)]
        );

        store.async_delete("rice").await.unwrap();
        assert_eq!(store.async_get("rice").await.unwrap(), None);
    }

    #[tokio::test]
    async fn borrowed_store_is_async_store() {
        let store = MemoryStore::new();
        let borrowed = &store;

        borrowed
            .async_put("salt", &ItemDocument::new(1, None))
            .await
            .unwrap();

        assert_eq!(store.len(), 1);
    }
}

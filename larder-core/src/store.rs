use indexmap::IndexMap;
use std::convert::Infallible;
use std::sync::RwLock;

use crate::item::ItemDocument;

/// A document store keyed by item name.
///
/// `put` has full-replace semantics: whatever was stored under the key
/// before is gone, including fields the new document leaves empty. Callers
/// that want to keep a field must re-supply it.
///
/// All methods take `&self` to support stores with internal locking (e.g., RocksDB).
pub trait DocumentStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns every document in store-defined order.
    fn list(&self) -> Result<Vec<(String, ItemDocument)>, Self::Error>;

    /// Retrieves the document stored under `key`, or None if not present.
    fn get(&self, key: &str) -> Result<Option<ItemDocument>, Self::Error>;

    /// Stores `document` under `key`, replacing any previous document.
    fn put(&self, key: &str, document: &ItemDocument) -> Result<(), Self::Error>;

    /// Removes the document under `key`. Missing keys are not an error.
    fn delete(&self, key: &str) -> Result<(), Self::Error>;
}

impl<S: DocumentStore> DocumentStore for &S {
    type Error = S::Error;

    fn list(&self) -> Result<Vec<(String, ItemDocument)>, Self::Error> {
        (*self).list()
    }

    fn get(&self, key: &str) -> Result<Option<ItemDocument>, Self::Error> {
        (*self).get(key)
    }

    fn put(&self, key: &str, document: &ItemDocument) -> Result<(), Self::Error> {
        (*self).put(key, document)
    }

    fn delete(&self, key: &str) -> Result<(), Self::Error> {
        (*self).delete(key)
    }
}

/// An in-memory store that lists documents in insertion order.
///
/// Useful for testing and as a reference implementation.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<IndexMap<String, ItemDocument>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.data.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DocumentStore for MemoryStore {
    type Error = Infallible;

    fn list(&self) -> Result<Vec<(String, ItemDocument)>, Self::Error> {
        Ok(self
            .data
            .read()
            .unwrap()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }

    fn get(&self, key: &str) -> Result<Option<ItemDocument>, Self::Error> {
        Ok(self.data.read().unwrap().get(key).cloned())
    }

    fn put(&self, key: &str, document: &ItemDocument) -> Result<(), Self::Error> {
        self.data
            .write()
            .unwrap()
            .insert(key.to_string(), document.clone());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), Self::Error> {
        self.data.write().unwrap().shift_remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn memory_store_put_get() {
        let store = MemoryStore::new();
        let doc = ItemDocument::new(2, NaiveDate::from_ymd_opt(2024, 3, 1));

        store.put("milk", &doc).unwrap();

        assert_eq!(store.get("milk").unwrap(), Some(doc));
    }

    #[test]
    fn memory_store_get_missing() {
        let store = MemoryStore::new();

        assert_eq!(store.get("nonexistent").unwrap(), None);
    }

    #[test]
    fn memory_store_put_replaces_whole_document() {
        let store = MemoryStore::new();

        store
            .put("milk", &ItemDocument::new(1, NaiveDate::from_ymd_opt(2024, 3, 1)))
            .unwrap();
        store.put("milk", &ItemDocument::new(5, None)).unwrap();

        assert_eq!(store.get("milk").unwrap(), Some(ItemDocument::new(5, None)));
    }

    #[test]
    fn memory_store_lists_in_insertion_order() {
        let store = MemoryStore::new();
        store.put("milk", &ItemDocument::new(1, None)).unwrap();
        store.put("eggs", &ItemDocument::new(12, None)).unwrap();
        store.put("bread", &ItemDocument::new(1, None)).unwrap();
        store.delete("eggs").unwrap();

        let keys: Vec<String> = store.list().unwrap().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["milk", "bread"]);
    }

    #[test]
    fn memory_store_delete_missing_is_ok() {
        let store = MemoryStore::new();

        store.delete("ghost").unwrap();

        assert!(store.is_empty());
    }
}

//! RocksDB-backed document store for Larder.

use std::path::Path;

use larder_core::{DocumentStore, ItemDocument};
use rocksdb::{DB, IteratorMode, Options};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RocksError {
    #[error("RocksDB error: {0}")]
    Rocks(#[from] rocksdb::Error),

    #[error("Corrupt document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Corrupt key: {0}")]
    Key(#[from] std::str::Utf8Error),
}

/// A persistent store backed by RocksDB.
pub struct RocksStore {
    db: DB,
}

impl RocksStore {
    /// Opens a RocksDB store at the given path.
    ///
    /// Creates the database if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RocksError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        let db = DB::open(&opts, path)?;
        Ok(Self { db })
    }
}

impl DocumentStore for RocksStore {
    type Error = RocksError;

    fn list(&self) -> Result<Vec<(String, ItemDocument)>, Self::Error> {
        let mut documents = Vec::new();
        for entry in self.db.iterator(IteratorMode::Start) {
            let (key, value) = entry?;
            let name = std::str::from_utf8(&key)?.to_string();
            documents.push((name, serde_json::from_slice(&value)?));
        }
        Ok(documents)
    }

    fn get(&self, key: &str) -> Result<Option<ItemDocument>, Self::Error> {
        match self.db.get_pinned(key.as_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn put(&self, key: &str, document: &ItemDocument) -> Result<(), Self::Error> {
        self.db.put(key.as_bytes(), serde_json::to_vec(document)?)?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), Self::Error> {
        self.db.delete(key.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn temp_store() -> (RocksStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = RocksStore::open(dir.path()).unwrap();
        (store, dir)
    }

    #[test]
    fn put_get() {
        let (store, _dir) = temp_store();
        let doc = ItemDocument::new(2, NaiveDate::from_ymd_opt(2024, 5, 1));

        store.put("butter", &doc).unwrap();

        assert_eq!(store.get("butter").unwrap(), Some(doc));
    }

    #[test]
    fn get_missing() {
        let (store, _dir) = temp_store();

        assert_eq!(store.get("nonexistent").unwrap(), None);
    }

    #[test]
    fn list_in_key_order() {
        let (store, _dir) = temp_store();
        store.put("tomato", &ItemDocument::new(4, None)).unwrap();
        store.put("onion", &ItemDocument::new(2, None)).unwrap();

        let names: Vec<String> = store.list().unwrap().into_iter().map(|(k, _)| k).collect();

        assert_eq!(names, vec!["onion", "tomato"]);
    }

    #[test]
    fn delete_is_idempotent() {
        let (store, _dir) = temp_store();
        store.put("onion", &ItemDocument::new(2, None)).unwrap();

        store.delete("onion").unwrap();
        store.delete("onion").unwrap();

        assert_eq!(store.get("onion").unwrap(), None);
    }

    #[test]
    fn persistence() {
        let dir = TempDir::new().unwrap();
        let doc = ItemDocument::new(1, None);

        {
            let store = RocksStore::open(dir.path()).unwrap();
            store.put("flour", &doc).unwrap();
        }

        {
            let store = RocksStore::open(dir.path()).unwrap();
            assert_eq!(store.get("flour").unwrap(), Some(doc));
        }
    }
}

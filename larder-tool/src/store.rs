use std::path::{Path, PathBuf};

use larder_core::{AsyncDocumentStore, DocumentStore, ItemDocument};
use larder_firestore::FirestoreStore;
use larder_fjall::FjallStore;
#[cfg(feature = "rocks")]
use larder_rocks::RocksStore;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::config::{Config, load_firestore};
use crate::error::PantryToolError;

#[derive(Debug, Error)]
pub enum AnyStoreError {
    #[error("fjall error: {0}")]
    Fjall(#[from] larder_fjall::FjallError),
    #[cfg(feature = "rocks")]
    #[error("rocks error: {0}")]
    Rocks(#[from] larder_rocks::RocksError),
    #[error("firestore error: {0}")]
    Firestore(#[from] larder_firestore::FirestoreError),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreType {
    #[default]
    Fjall,
    Rocks,
    Firestore,
}

impl std::str::FromStr for StoreType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fjall" => Ok(StoreType::Fjall),
            "rocks" | "rocksdb" => Ok(StoreType::Rocks),
            "firestore" => Ok(StoreType::Firestore),
            _ => Err(format!("unknown store type: {}", s)),
        }
    }
}

impl std::fmt::Display for StoreType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreType::Fjall => write!(f, "fjall"),
            StoreType::Rocks => write!(f, "rocks"),
            StoreType::Firestore => write!(f, "firestore"),
        }
    }
}

/// Runtime-dispatched document store.
pub enum AnyStore {
    Fjall(FjallStore),
    #[cfg(feature = "rocks")]
    Rocks(RocksStore),
    Firestore(FirestoreStore),
}

impl AnyStore {
    /// Opens the configured store. `path` is only used by local stores.
    pub fn open(store_type: StoreType, path: &Path, config: &Config) -> Result<Self, PantryToolError> {
        match store_type {
            StoreType::Fjall => {
                std::fs::create_dir_all(path)?;
                Ok(Self::Fjall(
                    FjallStore::open(path).map_err(AnyStoreError::from)?,
                ))
            }
            #[cfg(feature = "rocks")]
            StoreType::Rocks => {
                std::fs::create_dir_all(path)?;
                Ok(Self::Rocks(
                    RocksStore::open(path).map_err(AnyStoreError::from)?,
                ))
            }
            #[cfg(not(feature = "rocks"))]
            StoreType::Rocks => Err(PantryToolError::StoreUnsupported(store_type)),
            StoreType::Firestore => {
                let settings = load_firestore(config)?;
                let mut store = FirestoreStore::new(settings.project_id, settings.collection);
                if let Some(key) = settings.api_key {
                    store = store.with_api_key(key);
                }
                if let Some(url) = settings.base_url {
                    store = store.with_base_url(url);
                }
                debug!(
                    project = store.project_id(),
                    collection = store.collection(),
                    "using firestore store"
                );
                Ok(Self::Firestore(store))
            }
        }
    }
}

impl AsyncDocumentStore for AnyStore {
    type Error = AnyStoreError;

    async fn async_list(&self) -> Result<Vec<(String, ItemDocument)>, Self::Error> {
        match self {
            AnyStore::Fjall(s) => s.list().map_err(Into::into),
            #[cfg(feature = "rocks")]
            AnyStore::Rocks(s) => s.list().map_err(Into::into),
            AnyStore::Firestore(s) => s.async_list().await.map_err(Into::into),
        }
    }

    async fn async_get(&self, key: &str) -> Result<Option<ItemDocument>, Self::Error> {
        match self {
            AnyStore::Fjall(s) => s.get(key).map_err(Into::into),
            #[cfg(feature = "rocks")]
            AnyStore::Rocks(s) => s.get(key).map_err(Into::into),
            AnyStore::Firestore(s) => s.async_get(key).await.map_err(Into::into),
        }
    }

    async fn async_put(&self, key: &str, document: &ItemDocument) -> Result<(), Self::Error> {
        match self {
            AnyStore::Fjall(s) => s.put(key, document).map_err(Into::into),
            #[cfg(feature = "rocks")]
            AnyStore::Rocks(s) => s.put(key, document).map_err(Into::into),
            AnyStore::Firestore(s) => s.async_put(key, document).await.map_err(Into::into),
        }
    }

    async fn async_delete(&self, key: &str) -> Result<(), Self::Error> {
        match self {
            AnyStore::Fjall(s) => s.delete(key).map_err(Into::into),
            #[cfg(feature = "rocks")]
            AnyStore::Rocks(s) => s.delete(key).map_err(Into::into),
            AnyStore::Firestore(s) => s.async_delete(key).await.map_err(Into::into),
        }
    }
}

pub fn default_store_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("larder")
        .join("store")
}

//! Fjall-backed document store for Larder.

use std::path::Path;

use fjall::{Database, Guard as _, Keyspace, KeyspaceCreateOptions};
use larder_core::{DocumentStore, ItemDocument};
use thiserror::Error;

pub const DEFAULT_KEYSPACE: &str = "inventory";

#[derive(Debug, Error)]
pub enum FjallError {
    #[error("Fjall error: {0}")]
    Fjall(#[from] fjall::Error),

    #[error("Corrupt document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Corrupt key: {0}")]
    Key(#[from] std::string::FromUtf8Error),

    #[error("Invalid key: must be 1 to {MAX_KEY_LEN} bytes, got {0}")]
    InvalidKey(usize),
}

/// Longest key the underlying LSM tree accepts.
pub const MAX_KEY_LEN: usize = u16::MAX as usize;

fn check_key(key: &str) -> Result<&[u8], FjallError> {
    if key.is_empty() || key.len() > MAX_KEY_LEN {
        return Err(FjallError::InvalidKey(key.len()));
    }
    Ok(key.as_bytes())
}

/// A persistent store backed by Fjall.
///
/// Keys are UTF-8 item names, values are JSON-encoded documents. `list`
/// returns documents in key order. Empty names and names longer than
/// [`MAX_KEY_LEN`] bytes are rejected with [`FjallError::InvalidKey`].
pub struct FjallStore {
    keyspace: Keyspace,
    _database: Database, // Keep keyspace alive
}

impl FjallStore {
    /// Opens a Fjall store at the given path using the default keyspace.
    ///
    /// Creates the database if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, FjallError> {
        Self::open_keyspace(path, DEFAULT_KEYSPACE)
    }

    /// Opens a Fjall store at the given path with a specific keyspace name.
    ///
    /// Creates the database and keyspace if they don't exist.
    pub fn open_keyspace(path: impl AsRef<Path>, keyspace: &str) -> Result<Self, FjallError> {
        let database = Database::builder(path).open()?;
        let keyspace = database.keyspace(keyspace, || KeyspaceCreateOptions::default())?;
        Ok(Self {
            keyspace,
            _database: database,
        })
    }
}

impl DocumentStore for FjallStore {
    type Error = FjallError;

    fn list(&self) -> Result<Vec<(String, ItemDocument)>, Self::Error> {
        let mut documents = Vec::new();
        for guard in self.keyspace.iter() {
            let (key, value) = guard.into_inner()?;
            let name = String::from_utf8(key.to_vec())?;
            documents.push((name, serde_json::from_slice(&value)?));
        }
        Ok(documents)
    }

    fn get(&self, key: &str) -> Result<Option<ItemDocument>, Self::Error> {
        match self.keyspace.get(check_key(key)?)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn put(&self, key: &str, document: &ItemDocument) -> Result<(), Self::Error> {
        let key = check_key(key)?;
        let bytes = serde_json::to_vec(document)?;
        self.keyspace.insert(key, bytes)?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), Self::Error> {
        self.keyspace.remove(check_key(key)?)?;
        Ok(())
    }
}

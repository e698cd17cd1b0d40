use thiserror::Error;

use crate::store::AnyStoreError;

#[derive(Debug, Error)]
pub enum PantryToolError {
    #[error("API key not found. Set SPOONACULAR_API_KEY or configure ~/.config/larder/config.toml")]
    ApiKeyNotFound,

    #[error(
        "Firestore project not configured. Set LARDER_FIRESTORE_PROJECT or [firestore] project_id in ~/.config/larder/config.toml"
    )]
    FirestoreProjectMissing,

    #[cfg(not(feature = "rocks"))]
    #[error("Store type {0} is not available in this build")]
    StoreUnsupported(crate::store::StoreType),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store error: {0}")]
    Store(#[from] AnyStoreError),

    #[error(transparent)]
    Pantry(#[from] larder_core::PantryError),
}

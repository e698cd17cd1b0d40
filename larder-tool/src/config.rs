use std::path::PathBuf;

use serde::Deserialize;
use tracing::warn;

use crate::error::PantryToolError;
use crate::store::{StoreType, default_store_path};

const API_KEY_VAR: &str = "SPOONACULAR_API_KEY";
const FIRESTORE_PROJECT_VAR: &str = "LARDER_FIRESTORE_PROJECT";
const FIRESTORE_API_KEY_VAR: &str = "LARDER_FIRESTORE_API_KEY";

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    pub spoonacular_api_key: Option<String>,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub firestore: FirestoreConfig,
}

#[derive(Debug, Deserialize, Default)]
pub struct StoreConfig {
    #[serde(default)]
    pub r#type: StoreType,
    pub path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default)]
pub struct FirestoreConfig {
    pub project_id: Option<String>,
    pub collection: Option<String>,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

/// Connection settings for a Firestore-backed pantry, after env overrides.
#[derive(Debug, PartialEq, Eq)]
pub struct FirestoreSettings {
    pub project_id: String,
    pub collection: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("larder").join("config.toml"))
}

pub fn parse_config(content: &str) -> Result<Config, toml::de::Error> {
    toml::from_str(content)
}

pub fn load_config() -> Config {
    let Some(path) = config_path() else {
        return Config::default();
    };

    let Ok(content) = std::fs::read_to_string(&path) else {
        return Config::default();
    };

    parse_config(&content).unwrap_or_else(|err| {
        warn!(path = %path.display(), error = %err, "Ignoring unreadable config file");
        Config::default()
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn env_var(name: &str) -> Option<String> {
    non_empty(std::env::var(name).ok())
}

/// Environment first, then the config file.
pub fn resolve_api_key(env: Option<String>, config: &Config) -> Result<String, PantryToolError> {
    non_empty(env)
        .or_else(|| non_empty(config.spoonacular_api_key.clone()))
        .ok_or(PantryToolError::ApiKeyNotFound)
}

pub fn load_api_key(config: &Config) -> Result<String, PantryToolError> {
    resolve_api_key(env_var(API_KEY_VAR), config)
}

pub fn resolve_firestore(
    env_project: Option<String>,
    env_api_key: Option<String>,
    config: &FirestoreConfig,
) -> Result<FirestoreSettings, PantryToolError> {
    let project_id = non_empty(env_project)
        .or_else(|| non_empty(config.project_id.clone()))
        .ok_or(PantryToolError::FirestoreProjectMissing)?;

    Ok(FirestoreSettings {
        project_id,
        collection: non_empty(config.collection.clone())
            .unwrap_or_else(|| larder_firestore::DEFAULT_COLLECTION.to_string()),
        api_key: non_empty(env_api_key).or_else(|| non_empty(config.api_key.clone())),
        base_url: non_empty(config.base_url.clone()),
    })
}

pub fn load_firestore(config: &Config) -> Result<FirestoreSettings, PantryToolError> {
    resolve_firestore(
        env_var(FIRESTORE_PROJECT_VAR),
        env_var(FIRESTORE_API_KEY_VAR),
        &config.firestore,
    )
}

pub fn resolve_store_config(
    cli_type: Option<StoreType>,
    cli_path: Option<PathBuf>,
    config: &Config,
) -> (StoreType, PathBuf) {
    let store_type = cli_type.unwrap_or(config.store.r#type);
    let store_path = cli_path
        .or_else(|| config.store.path.clone())
        .unwrap_or_else(default_store_path);

    (store_type, store_path)
}

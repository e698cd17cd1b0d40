//! Larder is a pantry inventory tracker.
//!
//! Core concepts:
//! - **Item**: a named pantry entry with a quantity and an optional expiry date
//! - **Document store**: the single source of truth, keyed by item name
//! - **Pantry**: computes the next persisted document for every mutation
//! - **Expiry status**: a label/severity pair derived from "now" and an expiry date
//! - **PantryState**: the presentation-owned cache of inventory and recipe results
//!
//! # Example
//!
//! ```
//! use larder_core::{MemoryStore, Pantry};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let pantry = Pantry::new(MemoryStore::new());
//!
//!     pantry.increment("milk").await.unwrap();
//!     let items = pantry.increment("milk").await.unwrap();
//!     assert_eq!(items[0].quantity, 2);
//! }
//! ```

mod async_store;
mod error;
mod expiry;
mod item;
mod pantry;
mod recipe;
mod state;
mod store;

pub use async_store::AsyncDocumentStore;
pub use error::{PantryError, ValidationError};
pub use expiry::{ExpiryLabel, ExpiryStatus, Severity, classify, days_until};
pub use item::{InventoryItem, ItemDocument};
pub use pantry::Pantry;
pub use recipe::{RecipeDetail, RecipeSummary};
pub use state::{ItemRow, PantryState};
pub use store::{DocumentStore, MemoryStore};

//! Cloud Firestore document store for Larder.
//!
//! Each pantry item is one document in a collection (by default
//! `inventory`), keyed by item name and shaped
//! `{quantity: integer, expiryDate: string | null}`.
//!
//! # Example
//!
//! ```ignore
//! use larder_core::Pantry;
//! use larder_firestore::FirestoreStore;
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = FirestoreStore::new("my-project", "inventory").with_api_key("web-api-key");
//!     let pantry = Pantry::new(store);
//!
//!     for item in pantry.increment("milk").await.unwrap() {
//!         println!("{} x{}", item.display_name(), item.quantity);
//!     }
//! }
//! ```

mod client;
mod convert;
mod error;

pub use client::{DEFAULT_COLLECTION, FirestoreStore};
pub use convert::{api_error_message, build_document_body, parse_document, parse_list_page};
pub use error::FirestoreError;

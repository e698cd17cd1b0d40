//! Spoonacular recipe API client for Larder.
//!
//! Two endpoints are used: ingredient-based recipe search and recipe-detail
//! lookup. Failures are reported as [`RecipeServiceError`]; the
//! [`SpoonacularClient::suggest`] entry point swallows them into an empty list.
//!
//! # Example
//!
//! ```ignore
//! use larder_spoonacular::SpoonacularClient;
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = SpoonacularClient::new("your-api-key");
//!
//!     let recipes = client.search(&["eggs", "flour", "milk"]).await.unwrap();
//!     if let Some(first) = recipes.first() {
//!         let detail = client.details(first.id).await.unwrap();
//!         println!("{} ({} min)", detail.title, detail.ready_in_minutes);
//!     }
//! }
//! ```

mod client;
mod convert;
mod error;

pub use client::SpoonacularClient;
pub use convert::{api_error_message, ingredient_query};
pub use error::RecipeServiceError;

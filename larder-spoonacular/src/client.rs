use larder_core::{InventoryItem, RecipeDetail, RecipeSummary};
use tracing::{debug, instrument, warn};

use crate::convert::{api_error_message, ingredient_query};
use crate::error::RecipeServiceError;

const DEFAULT_BASE_URL: &str = "https://api.spoonacular.com";

/// Client for the Spoonacular recipe API.
pub struct SpoonacularClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl SpoonacularClient {
    /// Creates a new client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Creates a new client with a custom base URL.
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Finds recipes that use the given ingredients.
    ///
    /// An empty slice still issues the request, with an empty `ingredients` parameter.
    #[instrument(skip(self, ingredients), fields(ingredients = ingredients.len()))]
    pub async fn search<S: AsRef<str>>(
        &self,
        ingredients: &[S],
    ) -> Result<Vec<RecipeSummary>, RecipeServiceError> {
        let query = ingredient_query(ingredients);

        debug!("Sending recipe search to Spoonacular");

        let response = self
            .http
            .get(format!("{}/recipes/findByIngredients", self.base_url))
            .query(&[("ingredients", query.as_str()), ("apiKey", self.api_key.as_str())])
            .send()
            .await?;

        let body = read_body(response).await?;
        let recipes: Vec<RecipeSummary> = serde_json::from_str(&body)?;

        debug!(found = recipes.len(), "Received recipe search results");

        Ok(recipes)
    }

    /// Fetches full information for one recipe.
    #[instrument(skip(self))]
    pub async fn details(&self, recipe_id: u64) -> Result<RecipeDetail, RecipeServiceError> {
        debug!("Fetching recipe details from Spoonacular");

        let response = self
            .http
            .get(format!("{}/recipes/{}/information", self.base_url, recipe_id))
            .query(&[("apiKey", self.api_key.as_str())])
            .send()
            .await?;

        let body = read_body(response).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Recipe suggestions for the current inventory.
    ///
    /// Never fails: any service error is logged and yields an empty list.
    pub async fn suggest(&self, items: &[InventoryItem]) -> Vec<RecipeSummary> {
        let names: Vec<&str> = items.iter().map(|item| item.name.as_str()).collect();
        match self.search(&names).await {
            Ok(recipes) => recipes,
            Err(err) => {
                warn!(error = %err, "Recipe search failed, showing no recipes");
                Vec::new()
            }
        }
    }
}

async fn read_body(response: reqwest::Response) -> Result<String, RecipeServiceError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(RecipeServiceError::Api {
            status: status.as_u16(),
            message: api_error_message(&body),
        });
    }

    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = SpoonacularClient::new("test-key");
        assert_eq!(client.api_key, "test-key");
        assert_eq!(client.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_client_custom_base_url() {
        let client = SpoonacularClient::with_base_url("test-key", "http://localhost:8080/");
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[tokio::test]
    #[ignore = "requires SPOONACULAR_API_KEY env var"]
    async fn test_live_api() {
        let api_key = std::env::var("SPOONACULAR_API_KEY").expect("SPOONACULAR_API_KEY not set");
        let client = SpoonacularClient::new(api_key);

        let recipes = client.search(&["eggs", "flour", "milk"]).await.unwrap();
        assert!(!recipes.is_empty());

        let detail = client.details(recipes[0].id).await.unwrap();
        assert_eq!(detail.id, recipes[0].id);
        assert!(!detail.title.is_empty());
    }
}

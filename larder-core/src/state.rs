use chrono::{DateTime, NaiveDate, Utc};

use crate::expiry::{ExpiryStatus, classify};
use crate::item::InventoryItem;
use crate::recipe::{RecipeDetail, RecipeSummary};

/// A rendered inventory line. Derived on demand, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRow {
    pub name: String,
    pub display_name: String,
    pub quantity: u32,
    pub expiry_date: Option<NaiveDate>,
    pub status: ExpiryStatus,
}

/// Presentation-owned view state: the cached inventory listing, the last
/// recipe results and the recipe currently opened for detail.
///
/// The cache only changes when an operation succeeds, so a failed call leaves
/// it stale rather than half-updated.
#[derive(Debug, Default)]
pub struct PantryState {
    inventory: Vec<InventoryItem>,
    recipes: Vec<RecipeSummary>,
    detail: Option<RecipeDetail>,
}

impl PantryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inventory(&self) -> &[InventoryItem] {
        &self.inventory
    }

    pub fn recipes(&self) -> &[RecipeSummary] {
        &self.recipes
    }

    pub fn detail(&self) -> Option<&RecipeDetail> {
        self.detail.as_ref()
    }

    /// Replaces the cached inventory with the listing an engine call returned.
    ///
    /// On error the cache is left untouched and the error handed back.
    pub fn apply<E>(&mut self, outcome: Result<Vec<InventoryItem>, E>) -> Result<(), E> {
        self.inventory = outcome?;
        Ok(())
    }

    /// Item names in inventory order, as fed to recipe search.
    pub fn ingredient_names(&self) -> Vec<&str> {
        self.inventory.iter().map(|i| i.name.as_str()).collect()
    }

    /// Shows a new set of recipe results. An empty result also closes any open detail.
    pub fn show_recipes(&mut self, recipes: Vec<RecipeSummary>) {
        if recipes.is_empty() {
            self.detail = None;
        }
        self.recipes = recipes;
    }

    pub fn open_detail(&mut self, detail: RecipeDetail) {
        self.detail = Some(detail);
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
    }

    /// Inventory rows with expiry status computed against `now`.
    pub fn rows(&self, now: DateTime<Utc>) -> Vec<ItemRow> {
        self.inventory
            .iter()
            .map(|item| ItemRow {
                name: item.name.clone(),
                display_name: item.display_name(),
                quantity: item.quantity,
                expiry_date: item.expiry_date,
                status: classify(now, item.expiry_date),
            })
            .collect()
    }
}

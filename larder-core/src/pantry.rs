use chrono::NaiveDate;
use tracing::debug;

use crate::async_store::AsyncDocumentStore;
use crate::error::{PantryError, ValidationError};
use crate::item::{InventoryItem, ItemDocument};

/// Inventory state engine over a document store.
///
/// Every mutation reads the current document, derives the next one, writes
/// it, and returns a fresh full listing. Nothing is trusted from a previous
/// call. Concurrent mutations of the same name are last-write-wins.
///
/// Writes always carry the whole document, so increment and decrement keep
/// an item's expiry date even though the store replaces documents wholesale.
pub struct Pantry<S> {
    store: S,
}

impl<S: AsyncDocumentStore> Pantry<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Reads every item in store-defined order.
    pub async fn refresh(&self) -> Result<Vec<InventoryItem>, PantryError> {
        let documents = self.store.async_list().await.map_err(PantryError::store)?;
        debug!(count = documents.len(), "refreshed inventory");
        Ok(documents
            .into_iter()
            .map(|(name, doc)| InventoryItem::from_document(name, doc))
            .collect())
    }

    pub async fn get(&self, name: &str) -> Result<Option<InventoryItem>, PantryError> {
        let doc = self.read(name).await?;
        Ok(doc.map(|doc| InventoryItem::from_document(name, doc)))
    }

    /// Adds one unit, creating the item with quantity 1 if it does not exist.
    pub async fn increment(&self, name: &str) -> Result<Vec<InventoryItem>, PantryError> {
        let next = match self.read(name).await? {
            Some(doc) => {
                let quantity = doc
                    .quantity
                    .checked_add(1)
                    .ok_or_else(|| ValidationError::QuantityOverflow(name.to_string()))?;
                doc.with_quantity(quantity)
            }
            None => ItemDocument::new(1, None),
        };
        debug!(name, quantity = next.quantity, "increment");
        self.write(name, &next).await?;
        self.refresh().await
    }

    /// Removes one unit. The last unit deletes the item; a missing item is left alone.
    pub async fn decrement(&self, name: &str) -> Result<Vec<InventoryItem>, PantryError> {
        match self.read(name).await? {
            Some(doc) if doc.quantity <= 1 => {
                debug!(name, "decrement removed last unit");
                self.erase(name).await?;
            }
            Some(doc) => {
                let next = doc.with_quantity(doc.quantity - 1);
                debug!(name, quantity = next.quantity, "decrement");
                self.write(name, &next).await?;
            }
            None => debug!(name, "decrement on missing item"),
        }
        self.refresh().await
    }

    /// Creates or overwrites an item with an explicit quantity and expiry.
    ///
    /// Rejects an empty name or a zero quantity before touching the store.
    pub async fn set_exact(
        &self,
        name: &str,
        quantity: u32,
        expiry_date: Option<NaiveDate>,
    ) -> Result<Vec<InventoryItem>, PantryError> {
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if quantity == 0 {
            return Err(ValidationError::ZeroQuantity(name.to_string()).into());
        }

        let doc = ItemDocument::new(quantity, expiry_date);
        debug!(name, quantity, ?expiry_date, "set exact");
        self.write(name, &doc).await?;
        self.refresh().await
    }

    /// Deletes an item regardless of quantity. A missing item is left alone.
    pub async fn remove_completely(&self, name: &str) -> Result<Vec<InventoryItem>, PantryError> {
        if self.read(name).await?.is_some() {
            debug!(name, "remove completely");
            self.erase(name).await?;
        }
        self.refresh().await
    }

    async fn read(&self, name: &str) -> Result<Option<ItemDocument>, PantryError> {
        self.store.async_get(name).await.map_err(PantryError::store)
    }

    async fn write(&self, name: &str, doc: &ItemDocument) -> Result<(), PantryError> {
        self.store
            .async_put(name, doc)
            .await
            .map_err(PantryError::store)
    }

    async fn erase(&self, name: &str) -> Result<(), PantryError> {
        self.store
            .async_delete(name)
            .await
            .map_err(PantryError::store)
    }
}

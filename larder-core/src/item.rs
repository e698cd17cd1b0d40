use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The value persisted under an item's name.
///
/// Serializes as `{"quantity": 3, "expiryDate": "2024-01-10"}`, with
/// `expiryDate` set to `null` when the item has no expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDocument {
    pub quantity: u32,
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
}

impl ItemDocument {
    pub fn new(quantity: u32, expiry_date: Option<NaiveDate>) -> Self {
        Self {
            quantity,
            expiry_date,
        }
    }

    /// Same document with a different quantity. Expiry is carried over.
    pub fn with_quantity(&self, quantity: u32) -> Self {
        Self {
            quantity,
            expiry_date: self.expiry_date,
        }
    }
}

/// A pantry entry as seen by callers: the document plus its key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryItem {
    pub name: String,
    pub quantity: u32,
    pub expiry_date: Option<NaiveDate>,
}

impl InventoryItem {
    pub fn from_document(name: impl Into<String>, document: ItemDocument) -> Self {
        Self {
            name: name.into(),
            quantity: document.quantity,
            expiry_date: document.expiry_date,
        }
    }

    /// Name with its first character upper-cased. The stored name is untouched.
    pub fn display_name(&self) -> String {
        let mut chars = self.name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_json_shape() {
        let doc = ItemDocument::new(3, NaiveDate::from_ymd_opt(2024, 1, 10));
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"quantity": 3, "expiryDate": "2024-01-10"})
        );

        let bare = ItemDocument::new(1, None);
        let json = serde_json::to_value(&bare).unwrap();
        assert_eq!(json, serde_json::json!({"quantity": 1, "expiryDate": null}));
    }

    #[test]
    fn document_without_expiry_field_decodes() {
        let doc: ItemDocument = serde_json::from_str(r#"{"quantity": 2}"#).unwrap();
        assert_eq!(doc, ItemDocument::new(2, None));
    }

    #[test]
    fn display_name_capitalizes_first_char_only() {
        let item = InventoryItem::from_document("olive oil", ItemDocument::new(1, None));
        assert_eq!(item.display_name(), "Olive oil");
        assert_eq!(item.name, "olive oil");

        let empty = InventoryItem::from_document("", ItemDocument::new(1, None));
        assert_eq!(empty.display_name(), "");
    }
}

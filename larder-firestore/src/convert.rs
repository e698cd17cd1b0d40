use chrono::NaiveDate;
use larder_core::ItemDocument;
use serde_json::{Value, json};

use crate::error::FirestoreError;

/// Converts a document to a Firestore write body (`{"fields": {...}}`).
///
/// Both fields are always present so a write without an update mask
/// replaces the stored document completely.
pub fn build_document_body(doc: &ItemDocument) -> Value {
    let expiry = match doc.expiry_date {
        Some(date) => json!({ "stringValue": date.format("%Y-%m-%d").to_string() }),
        None => json!({ "nullValue": null }),
    };
    json!({
        "fields": {
            "quantity": { "integerValue": doc.quantity.to_string() },
            "expiryDate": expiry
        }
    })
}

/// Parses a Firestore `Document` resource into its ID and value.
pub fn parse_document(json: &Value) -> Result<(String, ItemDocument), FirestoreError> {
    let name = json
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| FirestoreError::Decode("document has no name".to_string()))?;
    let id = name.rsplit_once('/').map_or(name, |(_, id)| id).to_string();

    let fields = json.get("fields");
    let quantity = parse_quantity(fields.and_then(|f| f.get("quantity")))
        .ok_or_else(|| FirestoreError::Decode(format!("{id}: missing or invalid quantity")))?;
    let expiry_date = parse_expiry(fields.and_then(|f| f.get("expiryDate")))
        .map_err(|raw| FirestoreError::Decode(format!("{id}: invalid expiryDate {raw:?}")))?;

    Ok((id, ItemDocument::new(quantity, expiry_date)))
}

/// Parses one page of a `ListDocuments` response.
///
/// Returns the documents and the token for the next page, if any. An empty
/// collection comes back as `{}`.
pub fn parse_list_page(
    json: &Value,
) -> Result<(Vec<(String, ItemDocument)>, Option<String>), FirestoreError> {
    let documents = match json.get("documents") {
        Some(Value::Array(docs)) => docs
            .iter()
            .map(parse_document)
            .collect::<Result<Vec<_>, _>>()?,
        Some(_) => {
            return Err(FirestoreError::Decode(
                "documents is not an array".to_string(),
            ));
        }
        None => Vec::new(),
    };
    let next_page = json
        .get("nextPageToken")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .map(str::to_string);
    Ok((documents, next_page))
}

/// Extracts `error.message` from a Firestore error body.
pub fn api_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| {
            json.get("error")
                .and_then(|e| e.get("message"))
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| "Unknown error".to_string())
}

fn parse_quantity(value: Option<&Value>) -> Option<u32> {
    let value = value?;
    if let Some(int) = value.get("integerValue") {
        // int64 values travel as JSON strings.
        return match int {
            Value::String(s) => s.parse().ok(),
            Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
            _ => None,
        };
    }
    let double = value.get("doubleValue")?.as_f64()?;
    if double.fract() == 0.0 && double >= 0.0 && double <= f64::from(u32::MAX) {
        Some(double as u32)
    } else {
        None
    }
}

fn parse_expiry(value: Option<&Value>) -> Result<Option<NaiveDate>, String> {
    let Some(value) = value else {
        return Ok(None);
    };
    let raw = match (value.get("stringValue"), value.get("timestampValue")) {
        (Some(Value::String(s)), _) | (None, Some(Value::String(s))) => s.as_str(),
        _ => return Ok(None),
    };
    if raw.trim().is_empty() {
        return Ok(None);
    }
    // Accept full timestamps by keeping the calendar date.
    let date = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn body_carries_both_fields() {
        let body = build_document_body(&ItemDocument::new(3, date(2024, 1, 10)));
        assert_eq!(
            body,
            json!({
                "fields": {
                    "quantity": { "integerValue": "3" },
                    "expiryDate": { "stringValue": "2024-01-10" }
                }
            })
        );

        let body = build_document_body(&ItemDocument::new(1, None));
        assert_eq!(body["fields"]["expiryDate"], json!({ "nullValue": null }));
    }

    #[test]
    fn parses_document_resource() {
        let json = json!({
            "name": "projects/demo/databases/(default)/documents/inventory/milk",
            "fields": {
                "quantity": { "integerValue": "3" },
                "expiryDate": { "stringValue": "2024-01-10" }
            },
            "createTime": "2024-01-01T10:00:00.000000Z",
            "updateTime": "2024-01-02T10:00:00.000000Z"
        });

        let (id, doc) = parse_document(&json).unwrap();
        assert_eq!(id, "milk");
        assert_eq!(doc, ItemDocument::new(3, date(2024, 1, 10)));
    }

    #[test]
    fn quantity_only_document_has_no_expiry() {
        let json = json!({
            "name": "projects/demo/databases/(default)/documents/inventory/salt",
            "fields": { "quantity": { "integerValue": "2" } }
        });

        let (_, doc) = parse_document(&json).unwrap();
        assert_eq!(doc, ItemDocument::new(2, None));
    }

    #[test]
    fn lenient_expiry_and_quantity_encodings() {
        let json = json!({
            "name": "projects/demo/databases/(default)/documents/inventory/jam",
            "fields": {
                "quantity": { "doubleValue": 4.0 },
                "expiryDate": { "timestampValue": "2025-03-01T00:00:00Z" }
            }
        });
        let (_, doc) = parse_document(&json).unwrap();
        assert_eq!(doc, ItemDocument::new(4, date(2025, 3, 1)));

        let json = json!({
            "name": "projects/demo/databases/(default)/documents/inventory/jam",
            "fields": {
                "quantity": { "integerValue": "1" },
                "expiryDate": { "stringValue": "" }
            }
        });
        let (_, doc) = parse_document(&json).unwrap();
        assert_eq!(doc.expiry_date, None);
    }

    #[test]
    fn rejects_missing_quantity_and_bad_date() {
        let json = json!({
            "name": "projects/demo/databases/(default)/documents/inventory/x",
            "fields": {}
        });
        assert!(matches!(parse_document(&json), Err(FirestoreError::Decode(_))));

        let json = json!({
            "name": "projects/demo/databases/(default)/documents/inventory/x",
            "fields": {
                "quantity": { "integerValue": "1" },
                "expiryDate": { "stringValue": "next week" }
            }
        });
        assert!(matches!(parse_document(&json), Err(FirestoreError::Decode(_))));
    }

    #[test]
    fn empty_list_page() {
        let (docs, next) = parse_list_page(&json!({})).unwrap();
        assert!(docs.is_empty());
        assert_eq!(next, None);
    }

    #[test]
    fn error_message_extraction() {
        let body = r#"{"error":{"code":403,"message":"Missing or insufficient permissions.","status":"PERMISSION_DENIED"}}"#;
        assert_eq!(api_error_message(body), "Missing or insufficient permissions.");
        assert_eq!(api_error_message("not json"), "Unknown error");
    }
}

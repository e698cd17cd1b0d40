use serde_json::Value;

/// Joins ingredient names into the `ingredients` query value.
///
/// No filtering: an empty list yields an empty string.
pub fn ingredient_query<S: AsRef<str>>(names: &[S]) -> String {
    names
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Extracts a human-readable message from an error response body.
///
/// Spoonacular reports failures as `{"status": "failure", "code": 401, "message": "..."}`.
/// Bodies that are not JSON are returned as-is.
pub fn api_error_message(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(json) => json
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("Unknown error")
            .to_string(),
        Err(_) if body.trim().is_empty() => "Unknown error".to_string(),
        Err(_) => body.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_with_comma_space() {
        assert_eq!(ingredient_query(&["eggs", "olive oil"]), "eggs, olive oil");
    }

    #[test]
    fn empty_list_is_empty_string() {
        let names: [&str; 0] = [];
        assert_eq!(ingredient_query(&names), "");
    }

    #[test]
    fn error_message_from_json() {
        let body = r#"{"status":"failure","code":401,"message":"You are not authorized."}"#;
        assert_eq!(api_error_message(body), "You are not authorized.");
    }

    #[test]
    fn error_message_from_text() {
        assert_eq!(api_error_message("Bad Gateway\n"), "Bad Gateway");
        assert_eq!(api_error_message(""), "Unknown error");
        assert_eq!(api_error_message("{}"), "Unknown error");
    }
}

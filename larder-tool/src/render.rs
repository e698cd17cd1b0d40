use std::fmt::Write;

use larder_core::{ItemRow, RecipeDetail, RecipeSummary, Severity};

fn marker(severity: Severity) -> &'static str {
    match severity {
        Severity::Neutral => " ",
        Severity::Warning => "!",
        Severity::Alert => "X",
    }
}

pub fn render_inventory(rows: &[ItemRow]) -> String {
    if rows.is_empty() {
        return "Pantry is empty.\n".to_string();
    }

    let width = rows
        .iter()
        .map(|r| r.display_name.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for row in rows {
        let _ = write!(
            out,
            "{} {:<width$}  {:>4}",
            marker(row.status.severity),
            row.display_name,
            row.quantity,
        );
        if let Some(date) = row.expiry_date {
            let _ = write!(out, "  {}", date.format("%Y-%m-%d"));
        }
        if let Some(label) = row.status.label {
            let _ = write!(out, "  {}", label);
        }
        out.push('\n');
    }
    out
}

pub fn render_recipes(recipes: &[RecipeSummary]) -> String {
    if recipes.is_empty() {
        return "No recipes found.\n".to_string();
    }

    let mut out = String::new();
    for recipe in recipes {
        let _ = writeln!(
            out,
            "{:>8}  {}  (uses {}, missing {})",
            recipe.id, recipe.title, recipe.used_ingredient_count, recipe.missed_ingredient_count
        );
    }
    out
}

pub fn render_detail(detail: &RecipeDetail) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", detail.title);
    let _ = writeln!(out, "Ready in {} minutes", detail.ready_in_minutes);
    let _ = writeln!(out, "Servings: {}", detail.servings);
    if let Some(image) = &detail.image {
        let _ = writeln!(out, "Image: {}", image);
    }
    if let Some(source) = &detail.source_url {
        let _ = writeln!(out, "Source: {}", source);
    }
    if let Some(steps) = detail.plain_instructions() {
        let _ = writeln!(out, "\n{}", steps);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use larder_core::{InventoryItem, ItemDocument, PantryState};

    #[test]
    fn inventory_lines_carry_labels() {
        let mut state = PantryState::new();
        state
            .apply::<String>(Ok(vec![
                InventoryItem::from_document(
                    "milk",
                    ItemDocument::new(3, NaiveDate::from_ymd_opt(2024, 1, 9)),
                ),
                InventoryItem::from_document("rice", ItemDocument::new(1, None)),
            ]))
            .unwrap();
        let now = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();

        let text = render_inventory(&state.rows(now));

        assert_eq!(
            text,
            "X Milk     3  2024-01-09  Expired Yesterday\n  Rice     1\n"
        );
    }

    #[test]
    fn empty_views() {
        assert_eq!(render_inventory(&[]), "Pantry is empty.\n");
        assert_eq!(render_recipes(&[]), "No recipes found.\n");
    }

    #[test]
    fn detail_uses_plain_instructions() {
        let detail = RecipeDetail {
            id: 7,
            title: "Omelette".to_string(),
            image: None,
            instructions: Some("<p>Whisk eggs.</p><p>Cook.</p>".to_string()),
            ready_in_minutes: 10,
            servings: 1,
            source_url: None,
        };

        assert_eq!(
            render_detail(&detail),
            "Omelette\nReady in 10 minutes\nServings: 1\n\nWhisk eggs.\nCook.\n"
        );
    }
}

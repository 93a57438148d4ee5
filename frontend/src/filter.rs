use crate::models::{display_date, IncomeRecord};

/// Keeps the records matching both the selected category and the search query,
/// preserving their order.
pub fn filter_incomes(
    incomes: &[IncomeRecord],
    selected_category: Option<&str>,
    query: &str,
) -> Vec<IncomeRecord> {
    let needle = query.to_lowercase();
    incomes
        .iter()
        .filter(|income| selected_category.map_or(true, |id| income.category_id == id))
        .filter(|income| needle.is_empty() || matches_query(income, &needle))
        .cloned()
        .collect()
}

// `needle` is already lowercased.
fn matches_query(income: &IncomeRecord, needle: &str) -> bool {
    income.title.to_lowercase().contains(needle)
        || income.description.to_lowercase().contains(needle)
        || display_date(&income.date).to_lowercase().contains(needle)
}

/// Single-select toggle: picking the active category clears the selection.
pub fn toggle_category(current: Option<&str>, clicked: &str) -> Option<String> {
    match current {
        Some(active) if active == clicked => None,
        _ => Some(clicked.to_string()),
    }
}

//! Common utility functions shared across the codebase.

use std::collections::HashSet;

/// Collects `items`, dropping any already seen, keeping first-seen order.
///
/// # Examples
///
/// ```
/// use biotag::utils::dedup_preserving_order;
///
/// let skills = ["go", "rust", "go"].map(String::from);
/// assert_eq!(dedup_preserving_order(skills), vec!["go", "rust"]);
/// ```
pub fn dedup_preserving_order(items: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

/// `1 file`, `2 files`.
pub fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

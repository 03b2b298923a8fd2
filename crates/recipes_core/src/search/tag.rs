//! Case-insensitive tag matching.
//!
//! # Invariants
//! - Matching is exact per tag; no substring or prefix matches.
//! - Comparison uses per-character simple case folding, independent of any
//!   locale: `ς`, `σ` and `Σ` match, while `ß` never matches `ss`.
//! - An empty query never matches.

use crate::model::recipe::Recipe;

/// Compares two tags ignoring case.
///
/// Whitespace is significant: `" dessert"` and `"dessert"` differ.
pub fn tags_equal(left: &str, right: &str) -> bool {
    left == right || left.chars().flat_map(fold_char).eq(right.chars().flat_map(fold_char))
}

// Round-trips through uppercase so final sigma and similar variants share one
// form. Multi-char uppercase expansions (`ß` -> `SS`) are not followed.
fn fold_char(c: char) -> std::char::ToLowercase {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(single), None) => single.to_lowercase(),
        _ => c.to_lowercase(),
    }
}

/// Returns whether any tag of `recipe` equals `query` ignoring case.
pub fn recipe_has_tag(recipe: &Recipe, query: &str) -> bool {
    if query.is_empty() {
        return false;
    }
    recipe.tags.iter().any(|tag| tags_equal(tag, query))
}

//! Recipe domain model.
//!
//! # Responsibility
//! - Define the stored `Recipe` record and the caller-supplied `RecipeInput`.
//! - Validate required fields before a record reaches the store.
//!
//! # Invariants
//! - `id` is assigned by the store and never taken from caller input.
//! - `published_at` is set once at creation and survives full replacement.
//! - `name` must be non-empty; its content is otherwise unconstrained.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use utoipa::ToSchema;
use uuid::Uuid;

/// Opaque identifier of a stored recipe.
///
/// Kept as a plain string because seeded records may carry identifiers
/// produced by other generators.
pub type RecipeId = String;

/// Validation error for recipe input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeValidationError {
    /// `name` is empty.
    MissingName,
}

impl Display for RecipeValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingName => write!(f, "recipe name is required"),
        }
    }
}

impl Error for RecipeValidationError {}

/// Caller-supplied recipe fields.
///
/// Unknown keys such as `id` or `publishedAt` are ignored on decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct RecipeInput {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub ingredients: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub instructions: Vec<String>,
}

impl RecipeInput {
    /// Convenience constructor with empty sequences.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Checks required-field presence.
    pub fn validate(&self) -> Result<(), RecipeValidationError> {
        if self.name.is_empty() {
            return Err(RecipeValidationError::MissingName);
        }
        Ok(())
    }
}

/// Canonical stored recipe record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Store-assigned identifier.
    pub id: RecipeId,
    pub name: String,
    /// Search keys; duplicates and case variance are kept as supplied.
    pub tags: Vec<String>,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    /// Creation instant observed by the store. Serialized as RFC 3339.
    pub published_at: DateTime<Utc>,
}

impl Recipe {
    /// Builds a new record with a generated id and the current instant.
    pub fn new(input: RecipeInput) -> Self {
        Self::with_id(generate_recipe_id(), Utc::now(), input)
    }

    /// Builds a record from already-known identity and timestamp.
    ///
    /// Used by seed loading, where records arrive with existing identity.
    pub fn with_id(id: RecipeId, published_at: DateTime<Utc>, input: RecipeInput) -> Self {
        Self {
            id,
            name: input.name,
            tags: input.tags,
            ingredients: input.ingredients,
            instructions: input.instructions,
            published_at,
        }
    }

    /// Replaces every caller-owned field, keeping `id` and `published_at`.
    pub fn replace_fields(&mut self, input: RecipeInput) {
        self.name = input.name;
        self.tags = input.tags;
        self.ingredients = input.ingredients;
        self.instructions = input.instructions;
    }
}

/// Decodes an explicit JSON `null` the same way as an absent key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Generates a fresh collision-resistant recipe id (UUID v4 text).
pub fn generate_recipe_id() -> RecipeId {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::{Recipe, RecipeInput, RecipeValidationError};

    #[test]
    fn validate_requires_only_non_empty_name() {
        assert_eq!(
            RecipeInput::named("").validate(),
            Err(RecipeValidationError::MissingName)
        );
        assert!(RecipeInput::named("Pie").validate().is_ok());
        assert!(RecipeInput::named("   ").validate().is_ok());
    }

    #[test]
    fn input_decode_ignores_store_owned_fields_and_nulls() {
        let input: RecipeInput = serde_json::from_value(serde_json::json!({
            "id": "caller-id",
            "name": "Pie",
            "tags": null,
            "publishedAt": "2020-01-01T00:00:00Z"
        }))
        .unwrap();

        assert_eq!(input, RecipeInput::named("Pie"));
    }

    #[test]
    fn replace_fields_keeps_identity_and_timestamp() {
        let mut recipe = Recipe::new(RecipeInput::named("Pie"));
        let id = recipe.id.clone();
        let published_at = recipe.published_at;

        recipe.replace_fields(RecipeInput {
            name: "Tart".to_string(),
            tags: vec!["dessert".to_string()],
            ..RecipeInput::default()
        });

        assert_eq!(recipe.id, id);
        assert_eq!(recipe.published_at, published_at);
        assert_eq!(recipe.name, "Tart");
        assert_eq!(recipe.tags, vec!["dessert".to_string()]);
    }
}

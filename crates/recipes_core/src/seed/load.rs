use super::{SeedError, SeedResult};
use crate::model::recipe::{generate_recipe_id, null_as_default, Recipe, RecipeInput};
use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::Deserialize;
use std::path::Path;
use std::time::Instant;

/// Outcome of a best-effort seed load.
#[derive(Debug)]
pub struct SeedLoad {
    /// Records to start the store with, possibly empty.
    pub recipes: Vec<Recipe>,
    /// Why the seed was discarded, if it was.
    pub diagnostic: Option<SeedError>,
}

/// Seed rows are looser than stored records: identity and timestamp may be
/// missing and get filled in during normalization.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SeedRecipe {
    id: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    name: String,
    #[serde(deserialize_with = "null_as_default")]
    tags: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    ingredients: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    instructions: Vec<String>,
    published_at: Option<DateTime<Utc>>,
}

impl SeedRecipe {
    fn into_recipe(self, loaded_at: DateTime<Utc>) -> Recipe {
        let id = self
            .id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(generate_recipe_id);
        let input = RecipeInput {
            name: self.name,
            tags: self.tags,
            ingredients: self.ingredients,
            instructions: self.instructions,
        };
        Recipe::with_id(id, self.published_at.unwrap_or(loaded_at), input)
    }
}

/// Parses seed JSON (an array of recipe objects) into stored records.
///
/// Duplicate ids are passed through; the repository drops repeats.
pub fn parse_seed(json: &str) -> SeedResult<Vec<Recipe>> {
    let rows: Vec<SeedRecipe> = serde_json::from_str(json)?;
    let loaded_at = Utc::now();
    Ok(rows
        .into_iter()
        .map(|row| row.into_recipe(loaded_at))
        .collect())
}

/// Reads and parses the seed file at `path`.
///
/// # Side effects
/// - Emits one `seed_load` logging event with duration and status.
pub fn load_seed(path: impl AsRef<Path>) -> SeedLoad {
    let path = path.as_ref();
    let started_at = Instant::now();

    match read_seed(path) {
        Ok(recipes) => {
            info!(
                "event=seed_load module=seed status=ok path={} count={} duration_ms={}",
                path.display(),
                recipes.len(),
                started_at.elapsed().as_millis()
            );
            SeedLoad {
                recipes,
                diagnostic: None,
            }
        }
        Err(err) => {
            warn!(
                "event=seed_load module=seed status=discarded path={} duration_ms={} error={}",
                path.display(),
                started_at.elapsed().as_millis(),
                err
            );
            SeedLoad {
                recipes: Vec::new(),
                diagnostic: Some(err),
            }
        }
    }
}

fn read_seed(path: &Path) -> SeedResult<Vec<Recipe>> {
    let raw = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_seed(&raw)
}

#[cfg(test)]
mod tests {
    use super::parse_seed;
    use chrono::{TimeZone, Utc};

    #[test]
    fn parse_seed_fills_missing_identity_and_timestamp() {
        let recipes = parse_seed(
            r#"[
                {"name": "Toast", "tags": null},
                {"id": "", "name": "Jam"}
            ]"#,
        )
        .unwrap();

        assert_eq!(recipes.len(), 2);
        assert!(recipes.iter().all(|recipe| !recipe.id.is_empty()));
        assert_ne!(recipes[0].id, recipes[1].id);
        assert!(recipes[0].tags.is_empty());
    }

    #[test]
    fn parse_seed_keeps_supplied_identity_and_timestamp() {
        let recipes = parse_seed(
            r#"[{
                "id": "c0283p3d0cvuglq85log",
                "name": "Oregano Marinated Chicken",
                "tags": ["main", "chicken"],
                "ingredients": ["4 (6 to 7-ounce) boneless skinless chicken breasts"],
                "instructions": ["To marinate the chicken"],
                "publishedAt": "2021-01-17T19:28:52.803062+01:00"
            }]"#,
        )
        .unwrap();

        let recipe = &recipes[0];
        assert_eq!(recipe.id, "c0283p3d0cvuglq85log");
        assert_eq!(recipe.tags, vec!["main".to_string(), "chicken".to_string()]);
        let expected = Utc.with_ymd_and_hms(2021, 1, 17, 18, 28, 52).unwrap();
        assert_eq!(recipe.published_at.timestamp(), expected.timestamp());
    }

    #[test]
    fn parse_seed_rejects_non_array_document() {
        assert!(parse_seed(r#"{"name": "Toast"}"#).is_err());
    }
}

//! Recipe repository contract and in-memory implementation.
//!
//! # Responsibility
//! - Own the authoritative ordered collection of recipes.
//! - Serialize every read and write behind one mutex.
//!
//! # Invariants
//! - Ids are unique across the collection at all times.
//! - Iteration order is insertion order; removal closes the gap.
//! - Reads hand out clones, never references into the locked storage.
//! - The lock is held for exactly one operation and never across calls.

use crate::model::recipe::{Recipe, RecipeId, RecipeInput};
use crate::search::tag::recipe_has_tag;
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Mutex, MutexGuard};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for recipe storage operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    /// No stored recipe carries this id.
    NotFound(RecipeId),
    /// Insert would break id uniqueness.
    DuplicateId(RecipeId),
    /// A previous holder panicked while the collection was locked.
    LockPoisoned,
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "recipe not found: {id}"),
            Self::DuplicateId(id) => write!(f, "recipe id already stored: {id}"),
            Self::LockPoisoned => write!(f, "recipe collection lock poisoned"),
        }
    }
}

impl Error for RepoError {}

/// Repository interface for recipe storage.
pub trait RecipeRepository: Send + Sync {
    /// Appends one recipe; rejects an id that is already stored.
    fn insert(&self, recipe: Recipe) -> RepoResult<Recipe>;
    /// Snapshot of all recipes in insertion order.
    fn list(&self) -> RepoResult<Vec<Recipe>>;
    /// Gets one recipe by exact id.
    fn get(&self, id: &str) -> RepoResult<Option<Recipe>>;
    /// Replaces caller-owned fields of the first recipe matching `id`.
    fn replace(&self, id: &str, input: RecipeInput) -> RepoResult<Recipe>;
    /// Removes the first recipe matching `id`.
    fn remove(&self, id: &str) -> RepoResult<Recipe>;
    /// Recipes having at least one tag equal to `tag` ignoring case.
    fn find_by_tag(&self, tag: &str) -> RepoResult<Vec<Recipe>>;
    /// Number of stored recipes.
    fn len(&self) -> RepoResult<usize>;
    fn is_empty(&self) -> RepoResult<bool> {
        Ok(self.len()? == 0)
    }
}

/// Mutex-guarded, process-local recipe repository.
#[derive(Debug, Default)]
pub struct InMemoryRecipeRepository {
    recipes: Mutex<Vec<Recipe>>,
}

impl InMemoryRecipeRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository from an initial ordered sequence.
    ///
    /// Later records whose id repeats an earlier one are dropped, so the
    /// uniqueness invariant holds from the first operation on.
    pub fn with_seed(seed: Vec<Recipe>) -> Self {
        let mut recipes: Vec<Recipe> = Vec::with_capacity(seed.len());
        for recipe in seed {
            if recipes.iter().any(|stored| stored.id == recipe.id) {
                warn!(
                    "event=seed_duplicate module=repo status=skipped recipe_id={}",
                    recipe.id
                );
                continue;
            }
            recipes.push(recipe);
        }
        Self {
            recipes: Mutex::new(recipes),
        }
    }

    fn lock(&self) -> RepoResult<MutexGuard<'_, Vec<Recipe>>> {
        self.recipes.lock().map_err(|_| RepoError::LockPoisoned)
    }
}

impl RecipeRepository for InMemoryRecipeRepository {
    fn insert(&self, recipe: Recipe) -> RepoResult<Recipe> {
        let mut recipes = self.lock()?;
        if position_of(&recipes, &recipe.id).is_some() {
            return Err(RepoError::DuplicateId(recipe.id));
        }
        recipes.push(recipe.clone());
        Ok(recipe)
    }

    fn list(&self) -> RepoResult<Vec<Recipe>> {
        Ok(self.lock()?.clone())
    }

    fn get(&self, id: &str) -> RepoResult<Option<Recipe>> {
        let recipes = self.lock()?;
        Ok(position_of(&recipes, id).map(|index| recipes[index].clone()))
    }

    fn replace(&self, id: &str, input: RecipeInput) -> RepoResult<Recipe> {
        let mut recipes = self.lock()?;
        let index = position_of(&recipes, id)
            .ok_or_else(|| RepoError::NotFound(id.to_string()))?;
        let stored = &mut recipes[index];
        stored.replace_fields(input);
        Ok(stored.clone())
    }

    fn remove(&self, id: &str) -> RepoResult<Recipe> {
        let mut recipes = self.lock()?;
        let index = position_of(&recipes, id)
            .ok_or_else(|| RepoError::NotFound(id.to_string()))?;
        Ok(recipes.remove(index))
    }

    fn find_by_tag(&self, tag: &str) -> RepoResult<Vec<Recipe>> {
        let recipes = self.lock()?;
        Ok(recipes
            .iter()
            .filter(|recipe| recipe_has_tag(recipe, tag))
            .cloned()
            .collect())
    }

    fn len(&self) -> RepoResult<usize> {
        Ok(self.lock()?.len())
    }
}

// First match wins; a second match would mean the uniqueness invariant broke.
fn position_of(recipes: &[Recipe], id: &str) -> Option<usize> {
    recipes.iter().position(|recipe| recipe.id == id)
}

#[cfg(test)]
mod tests {
    use super::{InMemoryRecipeRepository, RecipeRepository, RepoError};
    use crate::model::recipe::{Recipe, RecipeInput};
    use chrono::Utc;

    fn seeded(id: &str, name: &str) -> Recipe {
        Recipe::with_id(id.to_string(), Utc::now(), RecipeInput::named(name))
    }

    #[test]
    fn with_seed_keeps_first_of_duplicate_ids() {
        let repo = InMemoryRecipeRepository::with_seed(vec![
            seeded("a", "first"),
            seeded("b", "second"),
            seeded("a", "shadow"),
        ]);

        let listed = repo.list().unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].name, "first");
        assert_eq!(listed[1].name, "second");
    }

    #[test]
    fn insert_rejects_stored_id() {
        let repo = InMemoryRecipeRepository::with_seed(vec![seeded("a", "first")]);
        let err = repo.insert(seeded("a", "again")).unwrap_err();
        assert_eq!(err, RepoError::DuplicateId("a".to_string()));
        assert_eq!(repo.len().unwrap(), 1);
    }

    #[test]
    fn remove_closes_gap_and_keeps_order() {
        let repo = InMemoryRecipeRepository::with_seed(vec![
            seeded("a", "one"),
            seeded("b", "two"),
            seeded("c", "three"),
        ]);

        let removed = repo.remove("b").unwrap();
        assert_eq!(removed.id, "b");

        let ids: Vec<String> = repo.list().unwrap().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["a".to_string(), "c".to_string()]);
    }

    #[test]
    fn list_returns_detached_snapshot() {
        let repo = InMemoryRecipeRepository::with_seed(vec![seeded("a", "one")]);
        let mut snapshot = repo.list().unwrap();
        snapshot[0].name = "mutated".to_string();
        snapshot.clear();

        assert_eq!(repo.get("a").unwrap().unwrap().name, "one");
    }

    #[test]
    fn replace_and_remove_unknown_id_return_not_found() {
        let repo = InMemoryRecipeRepository::new();
        assert_eq!(
            repo.replace("missing", RecipeInput::named("x")).unwrap_err(),
            RepoError::NotFound("missing".to_string())
        );
        assert_eq!(
            repo.remove("missing").unwrap_err(),
            RepoError::NotFound("missing".to_string())
        );
    }
}

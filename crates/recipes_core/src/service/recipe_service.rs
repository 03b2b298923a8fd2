//! Recipe use-case service.
//!
//! # Responsibility
//! - Provide create/list/get/update/delete/search APIs over a repository.
//! - Validate input and assign store-owned fields (`id`, `published_at`).
//! - Translate repository errors into caller-facing error kinds.
//!
//! # Invariants
//! - `update_recipe` uses full replacement semantics for caller-owned fields.
//! - Invalid input never reaches the repository.
//! - `published_at` is written only by `create_recipe`.

use crate::model::recipe::{Recipe, RecipeId, RecipeInput, RecipeValidationError};
use crate::repo::recipe_repo::{InMemoryRecipeRepository, RecipeRepository, RepoError};
use log::{debug, error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for recipe use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeServiceError {
    /// Input failed required-field validation.
    InvalidInput(RecipeValidationError),
    /// Target recipe does not exist.
    RecipeNotFound(RecipeId),
    /// Storage-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch, e.g. a generated id already stored.
    InconsistentState(&'static str),
}

impl Display for RecipeServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(err) => write!(f, "{err}"),
            Self::RecipeNotFound(id) => write!(f, "recipe not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent recipe state: {details}"),
        }
    }
}

impl Error for RecipeServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidInput(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RecipeValidationError> for RecipeServiceError {
    fn from(value: RecipeValidationError) -> Self {
        Self::InvalidInput(value)
    }
}

impl From<RepoError> for RecipeServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::RecipeNotFound(id),
            RepoError::DuplicateId(_) => {
                Self::InconsistentState("generated recipe id already stored")
            }
            other => Self::Repo(other),
        }
    }
}

pub type RecipeServiceResult<T> = Result<T, RecipeServiceError>;

/// Recipe service facade over repository implementations.
pub struct RecipeService<R: RecipeRepository> {
    repo: R,
}

impl RecipeService<InMemoryRecipeRepository> {
    /// Creates an in-memory store holding `seed` in order.
    pub fn with_seed(seed: Vec<Recipe>) -> Self {
        Self::new(InMemoryRecipeRepository::with_seed(seed))
    }
}

impl<R: RecipeRepository> RecipeService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates input, assigns id and timestamp, and appends the recipe.
    pub fn create_recipe(&self, input: RecipeInput) -> RecipeServiceResult<Recipe> {
        input.validate()?;
        let created = self.repo.insert(Recipe::new(input)).map_err(|err| {
            error!("event=recipe_create module=service status=error error={err}");
            RecipeServiceError::from(err)
        })?;
        info!(
            "event=recipe_create module=service status=ok recipe_id={}",
            created.id
        );
        Ok(created)
    }

    /// Returns every recipe in insertion order.
    pub fn list_recipes(&self) -> RecipeServiceResult<Vec<Recipe>> {
        Ok(self.repo.list()?)
    }

    /// Gets one recipe by exact id.
    pub fn get_recipe(&self, id: &str) -> RecipeServiceResult<Recipe> {
        self.repo
            .get(id)?
            .ok_or_else(|| RecipeServiceError::RecipeNotFound(id.to_string()))
    }

    /// Replaces all caller-owned fields of an existing recipe.
    ///
    /// Input is validated before the lookup, so an invalid body on an
    /// unknown id reports `InvalidInput`.
    pub fn update_recipe(&self, id: &str, input: RecipeInput) -> RecipeServiceResult<Recipe> {
        input.validate()?;
        let updated = self.repo.replace(id, input)?;
        info!("event=recipe_update module=service status=ok recipe_id={id}");
        Ok(updated)
    }

    /// Removes one recipe by id.
    pub fn delete_recipe(&self, id: &str) -> RecipeServiceResult<()> {
        self.repo.remove(id)?;
        info!("event=recipe_delete module=service status=ok recipe_id={id}");
        Ok(())
    }

    /// Lists recipes carrying `tag`, compared ignoring case.
    pub fn search_by_tag(&self, tag: &str) -> RecipeServiceResult<Vec<Recipe>> {
        let hits = self.repo.find_by_tag(tag)?;
        debug!(
            "event=recipe_search module=service status=ok hits={}",
            hits.len()
        );
        Ok(hits)
    }

    /// Number of stored recipes.
    pub fn len(&self) -> RecipeServiceResult<usize> {
        Ok(self.repo.len()?)
    }

    pub fn is_empty(&self) -> RecipeServiceResult<bool> {
        Ok(self.repo.is_empty()?)
    }
}

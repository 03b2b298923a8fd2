use recipes_core::{InMemoryRecipeRepository, Recipe, RecipeService};
use std::sync::Arc;

pub type RecipeStore = RecipeService<InMemoryRecipeRepository>;

/// Shared handler state; cloning shares the same store.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RecipeStore>,
}

impl AppState {
    pub fn new(store: RecipeStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub fn with_seed(seed: Vec<Recipe>) -> Self {
        Self::new(RecipeService::with_seed(seed))
    }
}

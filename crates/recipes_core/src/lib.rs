//! Core domain logic for the recipes service.
//! This crate owns the recipe store and every business invariant; transport
//! crates only call into it.

pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod seed;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LogSink};
pub use model::recipe::{Recipe, RecipeId, RecipeInput, RecipeValidationError};
pub use repo::recipe_repo::{InMemoryRecipeRepository, RecipeRepository, RepoError, RepoResult};
pub use search::tag::{recipe_has_tag, tags_equal};
pub use seed::{load_seed, parse_seed, SeedError, SeedLoad};
pub use service::recipe_service::{RecipeService, RecipeServiceError, RecipeServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

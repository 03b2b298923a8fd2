//! Recipe HTTP handlers.
//!
//! Each handler performs one store operation and logs one event line.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use log::info;
use recipes_core::{core_version, Recipe, RecipeInput};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{ApiError, ErrorBody};
use crate::state::AppState;

pub const DELETED_MESSAGE: &str = "Recipe has been deleted";

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageBody {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct HealthBody {
    pub status: &'static str,
    pub version: &'static str,
    /// Number of stored recipes.
    pub recipes: usize,
}

/// Creates a new recipe.
#[utoipa::path(
    post,
    path = "/recipes",
    tag = "recipes",
    request_body = RecipeInput,
    responses(
        (status = 200, description = "Created recipe", body = Recipe),
        (status = 400, description = "Unparseable body or missing name", body = ErrorBody)
    )
)]
pub async fn create_recipe_handler(
    State(state): State<AppState>,
    payload: Result<Json<RecipeInput>, JsonRejection>,
) -> Result<Json<Recipe>, ApiError> {
    let Json(input) = payload?;
    let created = state.store.create_recipe(input)?;
    info!(
        "event=http_create module=http status=ok recipe_id={}",
        created.id
    );
    Ok(Json(created))
}

/// Lists every recipe in insertion order.
#[utoipa::path(
    get,
    path = "/recipes",
    tag = "recipes",
    responses((status = 200, description = "All recipes", body = [Recipe]))
)]
pub async fn list_recipes_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Recipe>>, ApiError> {
    let recipes = state.store.list_recipes()?;
    info!(
        "event=http_list module=http status=ok count={}",
        recipes.len()
    );
    Ok(Json(recipes))
}

/// Shows one recipe.
#[utoipa::path(
    get,
    path = "/recipes/{id}",
    tag = "recipes",
    params(("id" = String, Path, description = "Recipe ID")),
    responses(
        (status = 200, description = "Stored recipe", body = Recipe),
        (status = 404, description = "Recipe not found", body = ErrorBody)
    )
)]
pub async fn show_recipe_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Recipe>, ApiError> {
    let recipe = state.store.get_recipe(&id)?;
    info!("event=http_show module=http status=ok recipe_id={id}");
    Ok(Json(recipe))
}

/// Replaces every field of a recipe except its id and publish time.
#[utoipa::path(
    put,
    path = "/recipes/{id}",
    tag = "recipes",
    params(("id" = String, Path, description = "Recipe ID")),
    request_body = RecipeInput,
    responses(
        (status = 200, description = "Updated recipe", body = Recipe),
        (status = 400, description = "Unparseable body or missing name", body = ErrorBody),
        (status = 404, description = "Recipe not found", body = ErrorBody)
    )
)]
pub async fn update_recipe_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<RecipeInput>, JsonRejection>,
) -> Result<Json<Recipe>, ApiError> {
    let Json(input) = payload?;
    let updated = state.store.update_recipe(&id, input)?;
    info!("event=http_update module=http status=ok recipe_id={id}");
    Ok(Json(updated))
}

/// Deletes a recipe.
#[utoipa::path(
    delete,
    path = "/recipes/{id}",
    tag = "recipes",
    params(("id" = String, Path, description = "Recipe ID")),
    responses(
        (status = 200, description = "Deleted", body = MessageBody),
        (status = 404, description = "Recipe not found", body = ErrorBody)
    )
)]
pub async fn delete_recipe_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageBody>, ApiError> {
    state.store.delete_recipe(&id)?;
    info!("event=http_delete module=http status=ok recipe_id={id}");
    Ok(Json(MessageBody {
        message: DELETED_MESSAGE.to_string(),
    }))
}

/// Searches recipes by tag, ignoring case.
///
/// Only the first `tag` pair counts; a missing tag searches for `""`.
#[utoipa::path(
    get,
    path = "/recipes/search",
    tag = "recipes",
    params(("tag" = String, Query, description = "Tag to search recipes")),
    responses((status = 200, description = "Matching recipes", body = [Recipe]))
)]
pub async fn search_recipes_handler(
    State(state): State<AppState>,
    params: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Vec<Recipe>>, ApiError> {
    let Query(pairs) = params?;
    let tag = first_value(&pairs, "tag").unwrap_or_default();
    let hits = state.store.search_by_tag(tag)?;
    info!(
        "event=http_search module=http status=ok hits={}",
        hits.len()
    );
    Ok(Json(hits))
}

/// GET /health
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthBody>, ApiError> {
    Ok(Json(HealthBody {
        status: "ok",
        version: core_version(),
        recipes: state.store.len()?,
    }))
}

fn first_value<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.as_str())
}

#[cfg(test)]
mod tests {
    use super::first_value;

    #[test]
    fn first_value_picks_earliest_matching_pair() {
        let pairs = vec![
            ("other".to_string(), "x".to_string()),
            ("tag".to_string(), "dessert".to_string()),
            ("tag".to_string(), "main".to_string()),
        ];
        assert_eq!(first_value(&pairs, "tag"), Some("dessert"));
        assert_eq!(first_value(&pairs, "missing"), None);
    }
}

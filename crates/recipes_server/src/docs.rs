//! Generated OpenAPI document for the recipe endpoints.

use recipes_core::{Recipe, RecipeInput};
use utoipa::OpenApi;

use crate::error::ErrorBody;
use crate::routes::{self, MessageBody};

pub const SWAGGER_UI_PATH: &str = "/swagger";
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Recipe API",
        description = "CRUD and tag search over an in-memory recipe collection"
    ),
    paths(
        routes::create_recipe_handler,
        routes::list_recipes_handler,
        routes::search_recipes_handler,
        routes::show_recipe_handler,
        routes::update_recipe_handler,
        routes::delete_recipe_handler,
    ),
    components(schemas(Recipe, RecipeInput, ErrorBody, MessageBody)),
    tags((name = "recipes", description = "Recipe records"))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::ApiDoc;
    use utoipa::OpenApi;

    #[test]
    fn document_lists_every_recipe_route() {
        let doc = ApiDoc::openapi();
        for path in ["/recipes", "/recipes/search", "/recipes/{id}"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
        let item = &doc.paths.paths["/recipes/{id}"];
        assert!(item.get.is_some() && item.put.is_some() && item.delete.is_some());
    }
}

//! HTTP surface for the recipes service.
//!
//! Maps recipe store operations onto JSON endpoints:
//!
//! | Method | Path | Operation |
//! |---|---|---|
//! | POST | `/recipes` | create |
//! | GET | `/recipes` | list |
//! | GET | `/recipes/search?tag=` | tag search |
//! | GET | `/recipes/:id` | get |
//! | PUT | `/recipes/:id` | full replace |
//! | DELETE | `/recipes/:id` | delete |
//! | GET | `/health` | liveness |
//! | GET | `/swagger/` | Swagger UI over `/api-docs/openapi.json` |
//!
//! Startup is best-effort about seed data: a missing or corrupt seed file
//! leaves the store empty and only logs a warning.

use axum::{routing::get, Router};
use log::{info, warn};
use recipes_core::{init_logging, load_seed};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod docs;
pub mod error;
pub mod routes;
pub mod state;

use config::Config;
use docs::{ApiDoc, OPENAPI_JSON_PATH, SWAGGER_UI_PATH};
use error::ServerError;
use routes::{
    create_recipe_handler, delete_recipe_handler, health_handler, list_recipes_handler,
    search_recipes_handler, show_recipe_handler, update_recipe_handler,
};
use state::AppState;

/// Builds the application router over `state`.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/recipes",
            get(list_recipes_handler).post(create_recipe_handler),
        )
        .route("/recipes/search", get(search_recipes_handler))
        .route(
            "/recipes/:id",
            get(show_recipe_handler)
                .put(update_recipe_handler)
                .delete(delete_recipe_handler),
        )
        .merge(SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_JSON_PATH, ApiDoc::openapi()))
        .layer(cors)
        .with_state(state)
}

/// Starts logging, loads the seed, and serves until a shutdown signal.
pub async fn run(config: Config) -> Result<(), ServerError> {
    init_logging(&config.log_level, config.log_dir.as_deref()).map_err(ServerError::Logging)?;
    config.log_defaults();

    info!("Initializing state...");
    let seed = load_seed(&config.seed_path);
    if let Some(diagnostic) = &seed.diagnostic {
        warn!("Starting with an empty recipe store: {diagnostic}");
    }
    let state = AppState::with_seed(seed.recipes);
    if state.store.is_empty().unwrap_or(true) {
        info!("Recipe store starts empty");
    } else {
        info!("Recipe store starts with {} recipes", state.store.len().unwrap_or(0));
    }

    let app = build_router(state);

    let address = config.bind_address();
    info!("Binding to {address}");
    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(err) => {
                warn!("Failed to listen for Ctrl+C: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(err) => {
                warn!("Failed to install terminate handler: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

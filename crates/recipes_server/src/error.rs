//! HTTP error mapping and server startup errors.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::error;
use recipes_core::RecipeServiceError;
use serde::Serialize;
use utoipa::ToSchema;
use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::config::ConfigError;

pub const RECIPE_NOT_FOUND: &str = "Recipe not found";

/// Request-level failure rendered as `{ "error": message }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Unparseable body or failed field validation.
    InvalidInput(String),
    NotFound,
    Internal(String),
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(message) | Self::Internal(message) => write!(f, "{message}"),
            Self::NotFound => write!(f, "{RECIPE_NOT_FOUND}"),
        }
    }
}

impl Error for ApiError {}

impl From<RecipeServiceError> for ApiError {
    fn from(value: RecipeServiceError) -> Self {
        match value {
            RecipeServiceError::InvalidInput(err) => Self::InvalidInput(err.to_string()),
            RecipeServiceError::RecipeNotFound(_) => Self::NotFound,
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        Self::InvalidInput(value.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(value: QueryRejection) -> Self {
        Self::InvalidInput(value.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("event=http_error module=http status=error error={self}");
        }
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Fatal startup failure returned to `main`.
#[derive(Debug)]
pub enum ServerError {
    Config(ConfigError),
    Logging(String),
    Io(std::io::Error),
}

impl Display for ServerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Logging(message) => write!(f, "failed to initialize logging: {message}"),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Logging(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}

impl From<ConfigError> for ServerError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<std::io::Error> for ServerError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

#[cfg(test)]
mod tests {
    use super::{ApiError, ServerError};
    use crate::config::{Config, PORT_KEY};
    use std::error::Error;
    use axum::http::StatusCode;
    use recipes_core::{RecipeServiceError, RecipeValidationError, RepoError};

    #[test]
    fn service_errors_map_to_status_codes() {
        let invalid = ApiError::from(RecipeServiceError::InvalidInput(
            RecipeValidationError::MissingName,
        ));
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

        let missing = ApiError::from(RecipeServiceError::RecipeNotFound("x".to_string()));
        assert_eq!(missing, ApiError::NotFound);
        assert_eq!(missing.to_string(), "Recipe not found");

        let internal = ApiError::from(RecipeServiceError::Repo(RepoError::LockPoisoned));
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn config_errors_convert_into_server_errors() {
        let result: Result<Config, ServerError> =
            Config::from_lookup(|key| (key == PORT_KEY).then(|| "eighty".to_string()))
                .map_err(ServerError::from);

        let err = result.unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
        assert!(err.to_string().contains("RECIPES_PORT"));
        assert!(err.source().is_some());
    }
}

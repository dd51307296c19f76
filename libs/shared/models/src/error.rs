use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::validation::{FieldError, ValidationError};

/// Message returned to callers for any upstream failure. The upstream detail
/// is logged where the failure is translated, never returned.
pub const UPSTREAM_FAILURE_MESSAGE: &str = "The monitoring engine could not complete the request";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Invalid input: {0}")]
    InvalidInput(ValidationError),

    #[error("{entity} {id} not found")]
    NotFound { entity: String, id: String },

    #[error("Upstream failure: {0}")]
    Upstream(String),
}

impl AppError {
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        AppError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    pub fn upstream() -> Self {
        AppError::Upstream(UPSTREAM_FAILURE_MESSAGE.to_string())
    }

    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::InvalidInput(ValidationError::single(field, message))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Auth(_) => StatusCode::UNAUTHORIZED,
            AppError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::InvalidInput(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let message = match &rejection {
            JsonRejection::JsonDataError(err) => format!("does not match the expected shape: {}", err.body_text()),
            JsonRejection::JsonSyntaxError(_) => "is not valid JSON".to_string(),
            JsonRejection::MissingJsonContentType(_) => "must be sent as application/json".to_string(),
            _ => "could not be read".to_string(),
        };
        AppError::invalid_field("body", message)
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::invalid_field("query", rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::invalid_field("path", rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self {
            AppError::InvalidInput(err) => {
                tracing::debug!("Rejected payload: {}", err);
                json!({
                    "error": "Invalid input",
                    "fields": err.errors.iter().map(FieldError::to_json).collect::<Vec<_>>(),
                })
            }
            AppError::NotFound { entity, id } => json!({
                "error": self.to_string(),
                "entity": entity,
                "id": id,
            }),
            AppError::Auth(msg) | AppError::Upstream(msg) => {
                tracing::error!("Error: {}: {}", status, msg);
                json!({ "error": msg })
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::Auth("x".into()).status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::invalid_field("url", "is required").status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(AppError::not_found("monitor", 5).status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::upstream().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_not_found_names_entity_and_id() {
        let err = AppError::not_found("status page", "main");
        assert_eq!(err.to_string(), "status page main not found");
    }
}

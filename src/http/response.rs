//! Response construction and error mapping.
//!
//! # Design Decisions
//! - Every failure is a JSON object with an `error` key
//! - Generated documents are served as `text/yaml`
//! - Internal errors are logged and never leak partial output

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::configurator::{GenerateError, TemplateError};

/// Errors surfaced by the HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Generated configuration is invalid")]
    InvalidConfig(Vec<String>),

    #[error("{0}")]
    Internal(String),
}

impl From<GenerateError> for ApiError {
    fn from(err: GenerateError) -> Self {
        match err {
            GenerateError::Params(_) => ApiError::BadRequest(err.to_string()),
            GenerateError::Invalid(errors) => ApiError::InvalidConfig(errors),
            GenerateError::Serialize(_) => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<TemplateError> for ApiError {
    fn from(err: TemplateError) -> Self {
        match err {
            TemplateError::NotFound(_) => ApiError::NotFound(err.to_string()),
            TemplateError::Generate(inner) => inner.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            ApiError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": message }))).into_response()
            }
            ApiError::InvalidConfig(errors) => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "Generated configuration is invalid",
                    "validation_errors": errors,
                })),
            )
                .into_response(),
            ApiError::Internal(message) => {
                tracing::error!(error = %message, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": message })),
                )
                    .into_response()
            }
        }
    }
}

/// A generated document served as YAML.
pub fn yaml(body: String) -> Response {
    ([(header::CONTENT_TYPE, "text/yaml")], body).into_response()
}

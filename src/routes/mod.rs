/**
 * Routes Module
 * API route handlers and the error type every handler returns
 */
pub mod blogs;
pub mod collection;
pub mod educations;
pub mod health;
pub mod projects;
pub mod services;
pub mod skills;

#[cfg(test)]
pub(crate) mod test_support;

use axum::{
    extract::{rejection::JsonRejection, FromRequest},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::StoreError;

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("invalid identifier {0:?}")]
    InvalidIdentifier(String),
    #[error("invalid request body: {0}")]
    BadRequest(String),
    #[error("request body too large: {0}")]
    PayloadTooLarge(String),
    #[error(transparent)]
    StoreUnavailable(#[from] StoreError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(rejection.body_text())
        } else {
            ApiError::BadRequest(rejection.body_text())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::NotFound(label) => (
                StatusCode::NOT_FOUND,
                ErrorResponse {
                    error: format!("{} not found", label),
                    message: None,
                },
            ),
            ApiError::InvalidIdentifier(_) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: "Invalid identifier".to_string(),
                    message: Some(
                        "Identifier must be a 24 character hexadecimal string".to_string(),
                    ),
                },
            ),
            ApiError::BadRequest(detail) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: "Invalid request body".to_string(),
                    message: Some(detail.clone()),
                },
            ),
            ApiError::PayloadTooLarge(detail) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                ErrorResponse {
                    error: "Request body too large".to_string(),
                    message: Some(detail.clone()),
                },
            ),
            ApiError::StoreUnavailable(e) => {
                tracing::error!(error = %e, "store operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Internal server error".to_string(),
                        message: None,
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// JSON body extractor whose rejection is an [`ApiError`], so malformed
/// bodies get the same error payload as everything else.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

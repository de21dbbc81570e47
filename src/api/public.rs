//! Public API types

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::Serialize;

use crate::core::EventNotFound;
use crate::scheduling::SchedulingError;

// Errors

/// A single problem found while validating a request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub path: String,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Vec<FieldError>>,
}

#[derive(Debug)]
pub enum ApiError {
    InvalidBody(Vec<FieldError>),
    BadRequest(String),
    Unauthorized,
    NotFound(String),
    Conflict(String),
    Internal(anyhow::Error),
}

/// Convert `ApiError` into an Axum compatible response.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, details) = match self {
            ApiError::InvalidBody(details) => (
                StatusCode::BAD_REQUEST,
                "Invalid request body".to_string(),
                Some(details),
            ),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string(), None),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg, None),
            ApiError::Internal(err) => {
                // Internal details stay in the logs
                tracing::error!("{:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        if status != StatusCode::INTERNAL_SERVER_ERROR {
            tracing::debug!("Request rejected with {}: {}", status, error);
        }

        (status, Json(ErrorBody { error, details })).into_response()
    }
}

/// Enables using `?` on functions that return `Result<_,
/// anyhow::Error>` to turn them into `Result<_, ApiError>`
impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err: anyhow::Error = err.into();
        if err.is::<EventNotFound>() {
            return Self::NotFound("Event not found".to_string());
        }
        if let Some(e) = err.downcast_ref::<SchedulingError>() {
            return Self::BadRequest(e.to_string());
        }
        Self::Internal(err)
    }
}

// Re-export public types from each route

pub mod availability {
    pub use crate::api::routes::availability::public::*;
}

pub mod book {
    pub use crate::api::routes::book::public::*;
}

pub mod cancel {
    pub use crate::api::routes::cancel::public::*;
}

pub mod suggest {
    pub use crate::api::routes::suggest::public::*;
}

pub mod webhook {
    pub use crate::api::routes::webhook::public::*;
}

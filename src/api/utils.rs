use std::fmt::Display;
use std::sync::{Arc, LazyLock};

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use regex::Regex;
use serde::de::DeserializeOwned;

use super::public::{ApiError, FieldError};
use crate::api::state::AppState;

type SharedState = Arc<AppState>;

pub const API_KEY_HEADER: &str = "x-api-key";

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex")
});

/// Reject requests whose `x-api-key` header doesn't match the configured
/// secret.
pub async fn require_api_key(
    State(state): State<SharedState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(expected) = state.config.api_secret_key.as_deref() else {
        return Err(ApiError::Internal(anyhow::anyhow!(
            "API_SECRET_KEY not configured"
        )));
    };

    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok());
    if provided != Some(expected) {
        tracing::warn!("Invalid or missing API key for {}", request.uri());
        return Err(ApiError::Unauthorized);
    }

    Ok(next.run(request).await)
}

/// JSON body extractor that reports malformed bodies as `400 Invalid
/// request body` instead of axum's plain text rejections.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(json_rejection(rejection)),
        }
    }
}

fn json_rejection(rejection: JsonRejection) -> ApiError {
    ApiError::InvalidBody(vec![FieldError {
        path: String::new(),
        message: rejection.body_text(),
    }])
}

/// Collects field errors so a request reports every problem at once.
#[derive(Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, path: &str, message: impl Into<String>) {
        self.errors.push(FieldError {
            path: path.to_string(),
            message: message.into(),
        });
    }

    pub fn range<T: PartialOrd + Display>(&mut self, path: &str, value: T, min: T, max: T) {
        if value < min {
            self.error(path, format!("Must be greater than or equal to {}", min));
        } else if value > max {
            self.error(path, format!("Must be less than or equal to {}", max));
        }
    }

    pub fn non_empty(&mut self, path: &str, value: &str) {
        if value.trim().is_empty() {
            self.error(path, "Must not be empty");
        }
    }

    pub fn email(&mut self, path: &str, value: &str) {
        if !EMAIL_RE.is_match(value) {
            self.error(path, "Invalid email");
        }
    }

    pub fn finish(self) -> Result<(), ApiError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::InvalidBody(self.errors))
        }
    }
}

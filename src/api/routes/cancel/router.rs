//! Router for the cancel API

use std::sync::Arc;

use axum::{Router, extract::State, response::Json};

use super::public;
use crate::api::public::ApiError;
use crate::api::state::AppState;
use crate::api::utils::{JsonBody, Validator};

type SharedState = Arc<AppState>;

/// Delete a previously booked event
async fn cancel_handler(
    State(state): State<SharedState>,
    JsonBody(req): JsonBody<public::CancelRequest>,
) -> Result<Json<public::CancelResponse>, ApiError> {
    let mut v = Validator::new();
    v.non_empty("eventId", &req.event_id);
    v.finish()?;

    let calendar_id = req
        .calendar_id
        .unwrap_or_else(|| state.config.default_calendar_id.clone());

    state.calendar.delete_event(&calendar_id, &req.event_id).await?;
    tracing::info!("Cancelled event {} on calendar {}", req.event_id, calendar_id);

    Ok(Json(public::CancelResponse { ok: true }))
}

/// Create the cancel router
pub fn router() -> Router<SharedState> {
    Router::new().route("/", axum::routing::post(cancel_handler))
}

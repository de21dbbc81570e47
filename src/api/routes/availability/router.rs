//! Router for the availability API

use std::sync::Arc;

use axum::{Router, extract::State, response::Json};

use super::public;
use crate::api::public::ApiError;
use crate::api::slots::validate_search;
use crate::api::state::AppState;
use crate::api::utils::{JsonBody, Validator};
use crate::core::availability::{SlotSearch, search_free_slots};
use crate::scheduling::Ranking;

type SharedState = Arc<AppState>;

/// Number of slots offered per availability request
const AVAILABILITY_LIMIT: usize = 3;

/// Return the next few open slots, soonest first
async fn availability_handler(
    State(state): State<SharedState>,
    JsonBody(req): JsonBody<public::AvailabilityRequest>,
) -> Result<Json<public::AvailabilityResponse>, ApiError> {
    let search = SlotSearch {
        days: req.days,
        duration_min: req.duration_min,
        work_hours: req.work_hours,
        buffer_min: req.buffer_min,
        calendar_id: req.calendar_id.as_deref(),
        tz: req.tz.as_deref(),
    };

    let mut v = Validator::new();
    validate_search(&search, &mut v);
    v.finish()?;

    let result = search_free_slots(&state.config, state.calendar.as_ref(), &search, |_| {
        Ok::<_, ApiError>(Ranking::Earliest {
            limit: AVAILABILITY_LIMIT,
        })
    })
    .await?;

    Ok(Json(public::AvailabilityResponse {
        time_zone: result.time_zone,
        slots: result
            .selection
            .slots
            .iter()
            .map(public::Slot::from)
            .collect(),
    }))
}

/// Create the availability router
pub fn router() -> Router<SharedState> {
    Router::new().route("/", axum::routing::post(availability_handler))
}

//! Router for the suggest API

use std::sync::Arc;

use axum::{Router, extract::State, response::Json};

use super::public;
use crate::api::public::ApiError;
use crate::api::slots::validate_search;
use crate::api::state::AppState;
use crate::api::utils::{JsonBody, Validator};
use crate::core::availability::{SlotSearch, search_free_slots};
use crate::scheduling::Ranking;
use crate::scheduling::time::{parse_in_zone, to_iso};

type SharedState = Arc<AppState>;

/// Offer open slots closest to a requested time that may itself be taken
async fn suggest_handler(
    State(state): State<SharedState>,
    JsonBody(req): JsonBody<public::SuggestRequest>,
) -> Result<Json<public::SuggestResponse>, ApiError> {
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
    v.range("maxSuggestions", req.max_suggestions, 1, 10);
    v.finish()?;

    let limit = req.max_suggestions;
    let ranking = |tz| -> Result<Ranking, ApiError> {
        let start = parse_in_zone(&req.requested_start_iso, tz)?;
        let end = parse_in_zone(&req.requested_end_iso, tz)?;
        if start >= end {
            return Err(ApiError::BadRequest(
                "Requested start time must be before end time".to_string(),
            ));
        }
        Ok(Ranking::Proximity {
            requested: start,
            limit,
        })
    };
    let result = search_free_slots(&state.config, state.calendar.as_ref(), &search, ranking).await?;

    let suggestions = result
        .selection
        .slots
        .iter()
        .map(|slot| public::Suggestion {
            start: to_iso(&slot.start),
            end: to_iso(&slot.end),
            duration: req.duration_min,
        })
        .collect();

    Ok(Json(public::SuggestResponse {
        requested_time: public::RequestedTime {
            start: req.requested_start_iso,
            end: req.requested_end_iso,
        },
        time_zone: result.time_zone,
        suggestions,
        total_available: result.selection.total_available,
    }))
}

/// Create the suggest router
pub fn router() -> Router<SharedState> {
    Router::new().route("/", axum::routing::post(suggest_handler))
}

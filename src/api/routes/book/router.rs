//! Router for the book API

use std::sync::Arc;

use axum::{Router, extract::State, response::Json};
use chrono::Duration;

use super::public;
use crate::api::public::ApiError;
use crate::api::state::AppState;
use crate::api::utils::{JsonBody, Validator};
use crate::core::NewEvent;
use crate::scheduling::time::{parse_in_zone, parse_timezone, to_iso};
use crate::scheduling::{Interval, busy_intervals, has_conflict};

type SharedState = Arc<AppState>;

const DEFAULT_MEETING_MINUTES: i64 = 30;

/// Margin around the requested slot when rechecking the calendar
const RECHECK_MARGIN_MINUTES: i64 = 10;

/// Create a calendar event with a video link for the requested slot
async fn book_handler(
    State(state): State<SharedState>,
    JsonBody(req): JsonBody<public::BookRequest>,
) -> Result<Json<public::BookResponse>, ApiError> {
    let mut v = Validator::new();
    v.non_empty("startISO", &req.start_iso);
    if let Some(email) = &req.attendee_email {
        v.email("attendeeEmail", email);
    }
    v.finish()?;

    let tz_name = req.tz.clone().unwrap_or_else(|| state.config.default_tz.clone());
    let tz = parse_timezone(&tz_name)?;
    let calendar_id = req
        .calendar_id
        .clone()
        .unwrap_or_else(|| state.config.booking_calendar_id.clone());

    let start = parse_in_zone(&req.start_iso, tz)?;
    let end = match &req.end_iso {
        Some(end_iso) => parse_in_zone(end_iso, tz)?,
        None => start + Duration::minutes(DEFAULT_MEETING_MINUTES),
    };
    if start >= end {
        return Err(ApiError::BadRequest(
            "Start time must be before end time".to_string(),
        ));
    }

    tracing::debug!(
        "Booking {} - {} ({}) on calendar {}",
        to_iso(&start),
        to_iso(&end),
        tz_name,
        calendar_id
    );

    if req.recheck {
        let margin = Duration::minutes(RECHECK_MARGIN_MINUTES);
        let busy = state
            .calendar
            .query_busy_periods(&calendar_id, &(start - margin), &(end + margin), &tz_name)
            .await?;

        let slot = Interval::new(start, end);
        if has_conflict(&slot, &busy_intervals(&busy, tz)) {
            return Err(ApiError::Conflict(
                "Time slot is no longer available".to_string(),
            ));
        }
    }

    let event = NewEvent {
        summary: req.title,
        description: req.description.filter(|d| !d.is_empty()),
        start,
        end,
        time_zone: tz_name,
        attendee_email: req.attendee_email,
    };
    let created = state.calendar.insert_event(&calendar_id, event).await?;

    tracing::info!("Booked event {} on calendar {}", created.id, calendar_id);

    Ok(Json(public::BookResponse {
        event_id: created.id,
        meet_link: created.meet_link,
        html_link: created.html_link,
    }))
}

/// Create the book router
pub fn router() -> Router<SharedState> {
    Router::new().route("/", axum::routing::post(book_handler))
}

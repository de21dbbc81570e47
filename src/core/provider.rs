//! The calendar backend the HTTP layer talks to

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::scheduling::{BusyPeriod, Instant};

/// Event to create on the calendar. A video conference link is always
/// requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub summary: String,
    pub description: Option<String>,
    pub start: Instant,
    pub end: Instant,
    pub time_zone: String,
    pub attendee_email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedEvent {
    pub id: String,
    pub meet_link: Option<String>,
    pub html_link: Option<String>,
}

/// Returned by [`CalendarProvider::delete_event`] when the event doesn't
/// exist.
#[derive(Debug, thiserror::Error)]
#[error("Event {event_id} not found in calendar {calendar_id}")]
pub struct EventNotFound {
    pub calendar_id: String,
    pub event_id: String,
}

#[async_trait]
pub trait CalendarProvider: Send + Sync {
    /// Busy periods of `calendar_id` between `time_min` and `time_max`.
    async fn query_busy_periods(
        &self,
        calendar_id: &str,
        time_min: &Instant,
        time_max: &Instant,
        time_zone: &str,
    ) -> Result<Vec<BusyPeriod>>;

    async fn insert_event(&self, calendar_id: &str, event: NewEvent) -> Result<CreatedEvent>;

    async fn delete_event(&self, calendar_id: &str, event_id: &str) -> Result<()>;
}

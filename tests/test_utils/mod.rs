//! Test utilities for integration tests
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::Value;
use tower::util::ServiceExt;

use callbook::api::{API_KEY_HEADER, AppState, app};
use callbook::core::{AppConfig, CalendarProvider, CreatedEvent, EventNotFound, NewEvent};
use callbook::scheduling::time::to_iso;
use callbook::scheduling::{BusyPeriod, Instant};

pub const TEST_API_KEY: &str = "test-secret";

/// A free/busy query as seen by the calendar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusyQuery {
    pub calendar_id: String,
    pub time_min: String,
    pub time_max: String,
    pub time_zone: String,
}

/// In-memory calendar that records every call made to it.
#[derive(Default)]
pub struct FakeCalendar {
    pub busy: Vec<BusyPeriod>,
    /// Event ids that can be deleted. Anything else is reported missing.
    pub events: Vec<String>,
    /// Make every call fail like a provider outage
    pub unavailable: bool,
    pub busy_queries: Mutex<Vec<BusyQuery>>,
    pub inserted: Mutex<Vec<(String, NewEvent)>>,
    pub deleted: Mutex<Vec<(String, String)>>,
}

impl FakeCalendar {
    pub fn with_busy(busy: Vec<BusyPeriod>) -> Self {
        Self {
            busy,
            ..Self::default()
        }
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable {
            return Err(anyhow!("Calendar backend unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl CalendarProvider for FakeCalendar {
    async fn query_busy_periods(
        &self,
        calendar_id: &str,
        time_min: &Instant,
        time_max: &Instant,
        time_zone: &str,
    ) -> Result<Vec<BusyPeriod>> {
        self.check_available()?;
        self.busy_queries.lock().unwrap().push(BusyQuery {
            calendar_id: calendar_id.to_string(),
            time_min: to_iso(time_min),
            time_max: to_iso(time_max),
            time_zone: time_zone.to_string(),
        });
        Ok(self.busy.clone())
    }

    async fn insert_event(&self, calendar_id: &str, event: NewEvent) -> Result<CreatedEvent> {
        self.check_available()?;
        let mut inserted = self.inserted.lock().unwrap();
        let id = format!("evt_{}", inserted.len() + 1);
        inserted.push((calendar_id.to_string(), event));
        Ok(CreatedEvent {
            meet_link: Some(format!("https://meet.google.com/{}", id)),
            html_link: Some(format!("https://calendar.google.com/event?eid={}", id)),
            id,
        })
    }

    async fn delete_event(&self, calendar_id: &str, event_id: &str) -> Result<()> {
        self.check_available()?;
        if !self.events.iter().any(|e| e == event_id) {
            return Err(EventNotFound {
                calendar_id: calendar_id.to_string(),
                event_id: event_id.to_string(),
            }
            .into());
        }
        self.deleted
            .lock()
            .unwrap()
            .push((calendar_id.to_string(), event_id.to_string()));
        Ok(())
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        api_secret_key: Some(TEST_API_KEY.to_string()),
        default_tz: "America/Los_Angeles".to_string(),
        default_calendar_id: "primary".to_string(),
        booking_calendar_id: "bookings@group.calendar.google.com".to_string(),
        bland_api_key: Some("test-bland-key".to_string()),
        ..AppConfig::default()
    }
}

/// Creates a test application router backed by `calendar`.
pub fn test_app(calendar: Arc<FakeCalendar>) -> Router {
    test_app_with_config(test_config(), calendar)
}

pub fn test_app_with_config(config: AppConfig, calendar: Arc<FakeCalendar>) -> Router {
    let app_state = AppState::new(config, calendar);
    app(Arc::new(app_state))
}

/// POST a JSON body with the test API key and decode the JSON response.
pub async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    post_json_with_key(app, uri, body, Some(TEST_API_KEY)).await
}

pub async fn post_json_with_key(
    app: Router,
    uri: &str,
    body: Value,
    api_key: Option<&str>,
) -> (StatusCode, Value) {
    let mut request = Request::builder()
        .uri(uri)
        .method("POST")
        .header("content-type", "application/json");
    if let Some(key) = api_key {
        request = request.header(API_KEY_HEADER, key);
    }

    let response = app
        .oneshot(request.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

pub async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into()))
}

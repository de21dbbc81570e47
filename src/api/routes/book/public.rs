//! Public types for the book API
use serde::{Deserialize, Serialize};

fn default_title() -> String {
    "Scheduled call".to_string()
}

fn default_as_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRequest {
    #[serde(rename = "startISO")]
    pub start_iso: String,
    /// Defaults to thirty minutes after the start
    #[serde(rename = "endISO")]
    pub end_iso: Option<String>,
    pub attendee_email: Option<String>,
    #[serde(default = "default_title")]
    pub title: String,
    pub description: Option<String>,
    pub calendar_id: Option<String>,
    pub tz: Option<String>,
    #[serde(default = "default_as_true")]
    pub recheck: bool,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    pub event_id: String,
    pub meet_link: Option<String>,
    pub html_link: Option<String>,
}

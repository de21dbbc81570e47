//! Public types for the suggest API
use serde::{Deserialize, Serialize};

use crate::api::slots::{default_buffer, default_days, default_duration, default_work_hours};

fn default_max_suggestions() -> usize {
    5
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestRequest {
    #[serde(rename = "requestedStartISO")]
    pub requested_start_iso: String,
    #[serde(rename = "requestedEndISO")]
    pub requested_end_iso: String,
    #[serde(default = "default_days")]
    pub days: u32,
    #[serde(default = "default_duration")]
    pub duration_min: u32,
    #[serde(default = "default_work_hours")]
    pub work_hours: (u32, u32),
    #[serde(default = "default_buffer")]
    pub buffer_min: u32,
    pub calendar_id: Option<String>,
    pub tz: Option<String>,
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RequestedTime {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub start: String,
    pub end: String,
    pub duration: u32,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestResponse {
    pub requested_time: RequestedTime,
    pub time_zone: String,
    pub suggestions: Vec<Suggestion>,
    pub total_available: usize,
}

//! Public types for the availability API
use serde::{Deserialize, Serialize};

use crate::api::slots::{default_buffer, default_days, default_duration, default_work_hours};
use crate::scheduling::Interval;
use crate::scheduling::time::to_iso;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityRequest {
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
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub time_zone: String,
    pub slots: Vec<Slot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub start: String,
    pub end: String,
}

impl From<&Interval> for Slot {
    fn from(interval: &Interval) -> Self {
        Slot {
            start: to_iso(&interval.start),
            end: to_iso(&interval.end),
        }
    }
}

//! Request defaults and validation shared by the availability and suggest
//! routes

use super::utils::Validator;
use crate::core::availability::SlotSearch;

pub fn default_days() -> u32 {
    7
}

pub fn default_duration() -> u32 {
    45
}

pub fn default_work_hours() -> (u32, u32) {
    (9, 18)
}

pub fn default_buffer() -> u32 {
    10
}

/// Record range errors for the search fields of a request.
pub fn validate_search(search: &SlotSearch<'_>, v: &mut Validator) {
    v.range("days", search.days, 1, 30);
    v.range("durationMin", search.duration_min, 15, 480);
    v.range("workHours.0", search.work_hours.0, 0, 23);
    v.range("workHours.1", search.work_hours.1, 0, 23);
    v.range("bufferMin", search.buffer_min, 0, 60);
}

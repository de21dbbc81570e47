use thiserror::Error;

/// Errors raised while validating inputs to the slot engine.
///
/// The engine functions themselves never fail; these come from the
/// constructors and parsers callers use before invoking them.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchedulingError {
    #[error("Invalid work hours: start hour must be before end hour")]
    InvalidWorkHours { start: u32, end: u32 },

    #[error("Invalid work hours: {0} is not an hour of the day")]
    HourOutOfRange(u32),

    #[error("Invalid duration: {0} minutes")]
    InvalidDuration(i64),

    #[error("Unknown time zone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

//! Time zone aware instants and intervals

use std::sync::LazyLock;

use chrono::{
    DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc,
};
use chrono_tz::Tz;
use regex::Regex;

use super::SchedulingError;

/// A point in time pinned to an IANA time zone.
pub type Instant = DateTime<Tz>;

/// Half-open span of time between two instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub start: Instant,
    pub end: Instant,
}

impl Interval {
    pub fn new(start: Instant, end: Instant) -> Self {
        Self { start, end }
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// True when the two intervals share some stretch of time. Touching
    /// endpoints do not count.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// True when `other` sits entirely inside this interval.
    pub fn engulfs(&self, other: &Interval) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Busy check used by the conflict filter: partial overlap, or either
    /// interval containing the other. For non-empty intervals containment
    /// implies overlap, so this is the strict overlap test.
    pub fn conflicts_with(&self, other: &Interval) -> bool {
        self.overlaps(other)
    }
}

pub fn parse_timezone(name: &str) -> Result<Tz, SchedulingError> {
    name.parse::<Tz>()
        .map_err(|_| SchedulingError::InvalidTimezone(name.to_string()))
}

/// Offset-carrying forms `parse_from_rfc3339` rejects: no seconds, or a
/// basic `+hhmm` offset.
const OFFSET_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
];

const LOCAL_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

// Hour without minutes, optionally followed by an offset
static HOUR_ONLY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4}-\d{2}-\d{2}T\d{2})([+-]\d{2}(?::?\d{2})?)?$")
        .expect("Invalid hour-only regex")
});

/// Rewrite a trailing `Z` as `+00:00` and pad hour-only times with `:00`
/// so the chrono formats above cover them.
fn normalize_iso(iso: &str) -> String {
    let iso = match iso.strip_suffix(['Z', 'z']) {
        Some(rest) => format!("{}+00:00", rest),
        None => iso.to_string(),
    };
    HOUR_ONLY_RE.replace(&iso, "${1}:00${2}").into_owned()
}

/// Parse an ISO-8601 timestamp into `tz`.
///
/// Timestamps carrying an offset (or `Z`) keep their absolute instant and
/// are shifted into `tz`. Timestamps without an offset, and bare dates, are
/// read as wall-clock time in `tz`.
pub fn parse_in_zone(iso: &str, tz: Tz) -> Result<Instant, SchedulingError> {
    let iso = iso.trim();
    let normalized = normalize_iso(iso);

    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalized) {
        return Ok(dt.with_timezone(&tz));
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&normalized, fmt) {
            return Ok(dt.with_timezone(&tz));
        }
    }

    for fmt in LOCAL_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&normalized, fmt) {
            return Ok(resolve_local(tz, naive));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(&normalized, "%Y-%m-%d") {
        return Ok(resolve_local(tz, date.and_time(chrono::NaiveTime::MIN)));
    }

    Err(SchedulingError::InvalidTimestamp(iso.to_string()))
}

/// RFC 3339 with milliseconds and the zone's offset, e.g.
/// `2024-01-01T09:10:00.000-08:00`. Only the `UTC` zone is written with `Z`.
pub fn to_iso(instant: &Instant) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, instant.timezone() == Tz::UTC)
}

pub fn now_in(tz: Tz) -> Instant {
    Utc::now().with_timezone(&tz)
}

/// Local midnight of the instant's calendar day.
pub fn start_of_day(instant: &Instant) -> Instant {
    resolve_local(
        instant.timezone(),
        instant.date_naive().and_time(chrono::NaiveTime::MIN),
    )
}

/// Map a wall-clock time onto an instant in `tz`.
///
/// Ambiguous times (DST fall back) take the earlier instant. Times that do
/// not exist (DST spring forward) are pushed forward by one hour.
pub fn resolve_local(tz: Tz, naive: NaiveDateTime) -> Instant {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            let shifted = naive + Duration::hours(1);
            match tz.from_local_datetime(&shifted) {
                LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt,
                // No zone skips more than an hour at once, so this only
                // guards against bad tz data.
                LocalResult::None => tz.from_utc_datetime(&naive),
            }
        }
    }
}

//! Dropping past and busy candidate slots

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use super::time::{Instant, Interval, parse_in_zone};

/// A busy period as reported by the calendar provider. Either end may be
/// missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyPeriod {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl BusyPeriod {
    pub fn new(start: &str, end: &str) -> Self {
        Self {
            start: Some(start.to_string()),
            end: Some(end.to_string()),
        }
    }
}

/// Parse busy periods into intervals in `tz`, dropping any that are
/// missing an endpoint or can't be parsed.
pub fn busy_intervals(periods: &[BusyPeriod], tz: Tz) -> Vec<Interval> {
    periods
        .iter()
        .filter_map(|period| {
            let (Some(start), Some(end)) = (&period.start, &period.end) else {
                tracing::warn!("Skipping incomplete busy period: {:?}", period);
                return None;
            };
            match (parse_in_zone(start, tz), parse_in_zone(end, tz)) {
                (Ok(start), Ok(end)) => Some(Interval::new(start, end)),
                (Err(e), _) | (_, Err(e)) => {
                    tracing::warn!("Skipping busy period {:?}: {}", period, e);
                    None
                }
            }
        })
        .collect()
}

/// Keep slots that start strictly after `now`.
pub fn filter_future_slots(slots: Vec<Interval>, now: &Instant) -> Vec<Interval> {
    slots.into_iter().filter(|slot| slot.start > *now).collect()
}

/// True if `slot` conflicts with any of the busy intervals.
pub fn has_conflict(slot: &Interval, busy: &[Interval]) -> bool {
    busy.iter().any(|period| slot.conflicts_with(period))
}

pub fn filter_conflicting_slots(slots: Vec<Interval>, busy: &[Interval]) -> Vec<Interval> {
    slots
        .into_iter()
        .filter(|slot| !has_conflict(slot, busy))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::America::Los_Angeles;

    fn at(iso: &str) -> Instant {
        parse_in_zone(iso, Los_Angeles).unwrap()
    }

    fn slot(start: &str, end: &str) -> Interval {
        Interval::new(at(start), at(end))
    }

    #[test]
    fn it_excludes_slots_starting_exactly_now() {
        let now = at("2024-01-01T09:00");
        let slots = vec![
            slot("2024-01-01T08:00", "2024-01-01T08:45"),
            slot("2024-01-01T09:00", "2024-01-01T09:45"),
            slot("2024-01-01T09:01", "2024-01-01T09:46"),
        ];

        let future = filter_future_slots(slots, &now);
        assert_eq!(future, vec![slot("2024-01-01T09:01", "2024-01-01T09:46")]);
    }

    #[test]
    fn it_filters_future_slots_idempotently() {
        let now = at("2024-01-01T10:00");
        let slots: Vec<Interval> = (8..14)
            .map(|h| {
                slot(
                    &format!("2024-01-01T{:02}:00", h),
                    &format!("2024-01-01T{:02}:30", h),
                )
            })
            .collect();

        let once = filter_future_slots(slots, &now);
        let twice = filter_future_slots(once.clone(), &now);
        assert_eq!(once, twice);
        assert_eq!(once.len(), 3);
    }

    #[test]
    fn it_never_conflicts_with_an_empty_busy_list() {
        let s = slot("2024-01-01T09:10", "2024-01-01T09:55");
        assert!(!has_conflict(&s, &[]));
    }

    #[test]
    fn it_ignores_adjacent_busy_periods() {
        let s = slot("2024-01-01T09:10", "2024-01-01T09:55");
        let busy = busy_intervals(
            &[
                BusyPeriod::new("2024-01-01T10:00:00-08:00", "2024-01-01T10:30:00-08:00"),
                BusyPeriod::new("2024-01-01T08:30:00-08:00", "2024-01-01T09:10:00-08:00"),
            ],
            Los_Angeles,
        );
        assert!(!has_conflict(&s, &busy));
    }

    #[test]
    fn it_detects_busy_periods_inside_the_slot() {
        let s = slot("2024-01-01T09:10", "2024-01-01T09:55");
        let busy = busy_intervals(
            &[BusyPeriod::new("2024-01-01T17:30:00Z", "2024-01-01T17:40:00Z")],
            Los_Angeles,
        );
        assert!(has_conflict(&s, &busy));
    }

    #[test]
    fn it_detects_partial_and_enclosing_overlap() {
        let s = slot("2024-01-01T09:10", "2024-01-01T09:55");
        let partial = vec![slot("2024-01-01T09:50", "2024-01-01T10:30")];
        let enclosing = vec![slot("2024-01-01T09:00", "2024-01-01T12:00")];
        let identical = vec![s];

        assert!(has_conflict(&s, &partial));
        assert!(has_conflict(&s, &enclosing));
        assert!(has_conflict(&s, &identical));
    }

    #[test]
    fn it_drops_malformed_busy_periods() {
        let periods = vec![
            BusyPeriod {
                start: None,
                end: Some("2024-01-01T10:00:00Z".to_string()),
            },
            BusyPeriod {
                start: Some("2024-01-01T10:00:00Z".to_string()),
                end: None,
            },
            BusyPeriod::new("not a date", "2024-01-01T10:00:00Z"),
            BusyPeriod::new("2024-01-01T09:00:00Z", "2024-01-01T10:00:00Z"),
        ];

        let busy = busy_intervals(&periods, Los_Angeles);
        assert_eq!(busy.len(), 1);
        assert_eq!(busy[0].start, at("2024-01-01T01:00"));
    }

    #[test]
    fn it_removes_only_conflicting_slots() {
        let slots = vec![
            slot("2024-01-01T09:00", "2024-01-01T09:30"),
            slot("2024-01-01T09:30", "2024-01-01T10:00"),
            slot("2024-01-01T10:00", "2024-01-01T10:30"),
        ];
        let busy = vec![slot("2024-01-01T09:30", "2024-01-01T10:00")];

        let free = filter_conflicting_slots(slots, &busy);
        assert_eq!(
            free,
            vec![
                slot("2024-01-01T09:00", "2024-01-01T09:30"),
                slot("2024-01-01T10:00", "2024-01-01T10:30"),
            ]
        );
    }
}

//! Candidate slot generation within work hours

use chrono::{Days, Duration, NaiveDate, NaiveTime};
use chrono_tz::Tz;

use super::SchedulingError;
use super::time::{Instant, Interval, resolve_local};

/// Daily local-time window, in whole hours, during which slots may start
/// and end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkHours {
    pub start: u32,
    pub end: u32,
}

impl WorkHours {
    pub fn new(start: u32, end: u32) -> Result<Self, SchedulingError> {
        if let Some(hour) = [start, end].into_iter().find(|h| *h > 23) {
            return Err(SchedulingError::HourOutOfRange(hour));
        }
        if start >= end {
            return Err(SchedulingError::InvalidWorkHours { start, end });
        }
        Ok(Self { start, end })
    }
}

impl Default for WorkHours {
    fn default() -> Self {
        Self { start: 9, end: 18 }
    }
}

/// Generate the candidate slots for the calendar day of `day`.
///
/// The cursor starts at the beginning of the work day and steps by
/// `duration_minutes`. Each candidate is shifted by `buffer_minutes` from
/// the cursor, so consecutive slots are `duration_minutes` apart, not
/// `duration_minutes + buffer_minutes`. Candidates ending after the end of
/// the work day are dropped.
pub fn generate_day_slots(
    day: &Instant,
    work_hours: WorkHours,
    duration_minutes: u32,
    buffer_minutes: u32,
) -> Vec<Interval> {
    slots_for_date(
        day.timezone(),
        day.date_naive(),
        work_hours,
        duration_minutes,
        buffer_minutes,
    )
}

/// Concatenate the day slots for `days` consecutive calendar days starting
/// with the day of `anchor_day`.
pub fn generate_multi_day_slots(
    anchor_day: &Instant,
    days: u32,
    work_hours: WorkHours,
    duration_minutes: u32,
    buffer_minutes: u32,
) -> Vec<Interval> {
    let tz = anchor_day.timezone();
    let first = anchor_day.date_naive();

    (0..days)
        .filter_map(|offset| first.checked_add_days(Days::new(offset.into())))
        .flat_map(|date| slots_for_date(tz, date, work_hours, duration_minutes, buffer_minutes))
        .collect()
}

fn slots_for_date(
    tz: Tz,
    date: NaiveDate,
    work_hours: WorkHours,
    duration_minutes: u32,
    buffer_minutes: u32,
) -> Vec<Interval> {
    let mut slots = Vec::new();

    // A zero duration would never advance the cursor
    if duration_minutes == 0 || work_hours.start >= work_hours.end {
        return slots;
    }

    let (Some(day_start), Some(day_end)) = (
        at_hour(tz, date, work_hours.start),
        at_hour(tz, date, work_hours.end),
    ) else {
        return slots;
    };

    let duration = Duration::minutes(duration_minutes.into());
    let buffer = Duration::minutes(buffer_minutes.into());

    let mut cursor = day_start;
    while cursor + duration - buffer <= day_end {
        let slot_start = cursor + buffer;
        let slot_end = slot_start + duration;

        if slot_end <= day_end {
            slots.push(Interval::new(slot_start, slot_end));
        }

        cursor += duration;
    }

    slots
}

fn at_hour(tz: Tz, date: NaiveDate, hour: u32) -> Option<Instant> {
    let time = NaiveTime::from_hms_opt(hour, 0, 0)?;
    Some(resolve_local(tz, date.and_time(time)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduling::time::{parse_in_zone, to_iso};
    use chrono::Timelike;
    use chrono_tz::America::Los_Angeles;

    fn day(iso: &str) -> Instant {
        parse_in_zone(iso, Los_Angeles).unwrap()
    }

    fn starts(slots: &[Interval]) -> Vec<String> {
        slots
            .iter()
            .map(|s| s.start.format("%H:%M").to_string())
            .collect()
    }

    #[test]
    fn it_validates_work_hours() {
        assert!(WorkHours::new(9, 18).is_ok());
        assert_eq!(
            WorkHours::new(18, 9),
            Err(SchedulingError::InvalidWorkHours { start: 18, end: 9 })
        );
        assert!(WorkHours::new(9, 9).is_err());
        assert_eq!(WorkHours::new(9, 24), Err(SchedulingError::HourOutOfRange(24)));
    }

    #[test]
    fn it_offsets_the_first_slot_by_the_buffer() {
        let slots = generate_day_slots(&day("2024-01-01"), WorkHours::new(9, 18).unwrap(), 45, 10);

        let first = slots[0];
        assert_eq!(to_iso(&first.start), "2024-01-01T09:10:00.000-08:00");
        assert_eq!(to_iso(&first.end), "2024-01-01T09:55:00.000-08:00");
    }

    #[test]
    fn it_advances_the_cursor_by_duration_only() {
        let slots = generate_day_slots(&day("2024-01-01"), WorkHours::new(9, 18).unwrap(), 45, 10);

        // Cursor visits 09:00, 09:45, ..., 17:15. The 17:15 candidate
        // would end at 18:10 and is dropped.
        assert_eq!(
            starts(&slots),
            vec![
                "09:10", "09:55", "10:40", "11:25", "12:10", "12:55", "13:40", "14:25", "15:10",
                "15:55", "16:40"
            ]
        );
        assert_eq!(to_iso(&slots[10].end), "2024-01-01T17:25:00.000-08:00");
    }

    #[test]
    fn it_fills_the_window_exactly_without_buffer() {
        let slots = generate_day_slots(&day("2024-01-01"), WorkHours::new(9, 11).unwrap(), 30, 0);
        assert_eq!(starts(&slots), vec!["09:00", "09:30", "10:00", "10:30"]);
        assert_eq!(slots[3].end.hour(), 11);
    }

    #[test]
    fn it_produces_nothing_when_duration_exceeds_the_window() {
        let slots = generate_day_slots(&day("2024-01-01"), WorkHours::new(9, 10).unwrap(), 90, 0);
        assert!(slots.is_empty());
    }

    #[test]
    fn it_produces_nothing_for_inverted_or_zero_input() {
        let inverted = WorkHours { start: 18, end: 9 };
        assert!(generate_day_slots(&day("2024-01-01"), inverted, 30, 0).is_empty());
        assert!(generate_day_slots(&day("2024-01-01"), WorkHours::default(), 0, 10).is_empty());
    }

    #[test]
    fn it_keeps_every_slot_inside_the_work_day() {
        let work_hours = WorkHours::new(8, 17).unwrap();
        for (duration, buffer) in [(15, 0), (25, 5), (45, 10), (60, 60), (480, 30)] {
            let slots =
                generate_multi_day_slots(&day("2024-01-01"), 3, work_hours, duration, buffer);
            for slot in slots {
                assert_eq!(slot.duration(), Duration::minutes(duration.into()));
                assert!(slot.start.hour() >= 8);
                let day_end = at_hour(Los_Angeles, slot.start.date_naive(), 17).unwrap();
                assert!(slot.end <= day_end);
                assert_eq!(slot.start.date_naive(), slot.end.date_naive());
            }
        }
    }

    #[test]
    fn it_concatenates_days_in_order() {
        let work_hours = WorkHours::new(9, 11).unwrap();
        let slots = generate_multi_day_slots(&day("2024-01-30"), 3, work_hours, 60, 0);

        let dates: Vec<String> = slots
            .iter()
            .map(|s| s.start.format("%m-%d %H:%M").to_string())
            .collect();
        assert_eq!(
            dates,
            vec![
                "01-30 09:00",
                "01-30 10:00",
                "01-31 09:00",
                "01-31 10:00",
                "02-01 09:00",
                "02-01 10:00"
            ]
        );
        assert!(slots.windows(2).all(|w| w[0].start < w[1].start));
    }

    #[test]
    fn it_ignores_the_time_of_day_of_the_anchor() {
        let work_hours = WorkHours::new(9, 10).unwrap();
        let from_midnight = generate_multi_day_slots(&day("2024-01-01"), 2, work_hours, 30, 0);
        let from_afternoon =
            generate_multi_day_slots(&day("2024-01-01T15:30:00"), 2, work_hours, 30, 0);
        assert_eq!(from_midnight, from_afternoon);
    }

    #[test]
    fn it_uses_local_wall_clock_across_dst() {
        // Los Angeles springs forward on 2024-03-10
        let work_hours = WorkHours::new(9, 10).unwrap();
        let slots = generate_multi_day_slots(&day("2024-03-09"), 2, work_hours, 60, 0);
        assert_eq!(to_iso(&slots[0].start), "2024-03-09T09:00:00.000-08:00");
        assert_eq!(to_iso(&slots[1].start), "2024-03-10T09:00:00.000-07:00");
    }
}

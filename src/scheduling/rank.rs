//! Ordering and truncating available slots

use super::time::{Instant, Interval};

/// How to pick the slots returned to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ranking {
    /// Soonest first
    Earliest { limit: usize },
    /// Closest start to `requested` first, in either direction
    Proximity { requested: Instant, limit: usize },
}

impl Ranking {
    pub fn apply(&self, slots: Vec<Interval>) -> Vec<Interval> {
        match *self {
            Ranking::Earliest { limit } => rank_earliest(slots, limit),
            Ranking::Proximity { requested, limit } => rank_by_proximity(slots, &requested, limit),
        }
    }
}

pub fn rank_earliest(mut slots: Vec<Interval>, limit: usize) -> Vec<Interval> {
    slots.sort_by_key(|slot| slot.start);
    slots.truncate(limit);
    slots
}

/// Sort by absolute distance between slot start and `requested`. Equal
/// distances keep their input order.
pub fn rank_by_proximity(
    mut slots: Vec<Interval>,
    requested: &Instant,
    limit: usize,
) -> Vec<Interval> {
    slots.sort_by_key(|slot| (slot.start - *requested).abs());
    slots.truncate(limit);
    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduling::time::parse_in_zone;
    use chrono::Duration;
    use chrono_tz::America::{Los_Angeles, New_York};

    fn at(iso: &str) -> Instant {
        parse_in_zone(iso, Los_Angeles).unwrap()
    }

    fn half_hour(start: &str) -> Interval {
        let start = at(start);
        Interval::new(start, start + Duration::minutes(30))
    }

    #[test]
    fn it_takes_the_earliest_slots_across_days() {
        let slots = vec![
            half_hour("2024-01-02T09:00"),
            half_hour("2024-01-01T15:00"),
            half_hour("2024-01-02T10:00"),
            half_hour("2024-01-01T09:00"),
            half_hour("2024-01-02T11:00"),
            half_hour("2024-01-01T12:00"),
            half_hour("2024-01-02T16:00"),
            half_hour("2024-01-01T10:00"),
            half_hour("2024-01-02T14:00"),
            half_hour("2024-01-01T16:30"),
        ];

        let top = rank_earliest(slots, 3);
        assert_eq!(
            top,
            vec![
                half_hour("2024-01-01T09:00"),
                half_hour("2024-01-01T10:00"),
                half_hour("2024-01-01T12:00"),
            ]
        );
    }

    #[test]
    fn it_compares_instants_not_wall_clock() {
        // 09:00 New York is 06:00 Los Angeles
        let ny_start = parse_in_zone("2024-01-01T09:00", New_York)
            .unwrap()
            .with_timezone(&Los_Angeles);
        let ny = Interval::new(ny_start, ny_start + Duration::minutes(30));
        let la = half_hour("2024-01-01T08:00");

        let top = rank_earliest(vec![la, ny], 1);
        assert_eq!(top, vec![ny]);
    }

    #[test]
    fn it_returns_everything_when_limit_exceeds_input() {
        let slots = vec![half_hour("2024-01-01T10:00"), half_hour("2024-01-01T09:00")];
        let ranked = rank_earliest(slots, 10);
        assert_eq!(ranked.len(), 2);
        assert!(ranked.windows(2).all(|w| w[0].start <= w[1].start));
    }

    #[test]
    fn it_ranks_by_distance_to_the_requested_time() {
        let requested = at("2024-01-01T12:00");
        let slots = vec![
            half_hour("2024-01-01T09:00"),
            half_hour("2024-01-01T13:30"),
            half_hour("2024-01-01T11:30"),
            half_hour("2024-01-02T12:00"),
            half_hour("2024-01-01T12:45"),
        ];

        let ranked = rank_by_proximity(slots, &requested, 5);
        let distances: Vec<i64> = ranked
            .iter()
            .map(|s| (s.start - requested).abs().num_minutes())
            .collect();
        assert_eq!(distances, vec![30, 45, 90, 180, 1440]);
    }

    #[test]
    fn it_keeps_input_order_for_equal_distances() {
        let requested = at("2024-01-01T12:00");
        let after = half_hour("2024-01-01T13:00");
        let before = half_hour("2024-01-01T11:00");

        assert_eq!(
            rank_by_proximity(vec![after, before], &requested, 2),
            vec![after, before]
        );
        assert_eq!(
            rank_by_proximity(vec![before, after], &requested, 2),
            vec![before, after]
        );
    }

    #[test]
    fn it_applies_the_selected_policy() {
        let slots = vec![half_hour("2024-01-01T09:00"), half_hour("2024-01-01T15:00")];

        let earliest = Ranking::Earliest { limit: 1 }.apply(slots.clone());
        assert_eq!(earliest, vec![half_hour("2024-01-01T09:00")]);

        let closest = Ranking::Proximity {
            requested: at("2024-01-01T14:00"),
            limit: 1,
        }
        .apply(slots);
        assert_eq!(closest, vec![half_hour("2024-01-01T15:00")]);
    }
}

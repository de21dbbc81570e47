//! Slot arithmetic for finding open meeting times.
//!
//! Candidate slots are generated inside work hours over a number of days,
//! past slots are dropped, slots overlapping busy calendar periods are
//! dropped, and whatever is left is ranked and truncated. Busy periods are
//! fetched by the caller; nothing in here does I/O.

mod error;
mod filter;
mod rank;
mod slots;
pub mod time;

pub use error::SchedulingError;
pub use filter::{
    BusyPeriod, busy_intervals, filter_conflicting_slots, filter_future_slots, has_conflict,
};
pub use rank::{Ranking, rank_by_proximity, rank_earliest};
pub use slots::{WorkHours, generate_day_slots, generate_multi_day_slots};
pub use time::{Instant, Interval};

/// Everything needed to generate and filter candidate slots for one request.
#[derive(Debug, Clone)]
pub struct SlotQuery {
    /// Any instant on the first day to consider. Only its date and zone
    /// are used.
    pub anchor_day: Instant,
    pub days: u32,
    pub work_hours: WorkHours,
    pub duration_minutes: u32,
    pub buffer_minutes: u32,
    pub now: Instant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotSelection {
    pub slots: Vec<Interval>,
    /// Number of free slots before ranking truncated the list
    pub total_available: usize,
}

/// Run the full pipeline: generate, drop past slots, drop busy slots, rank.
pub fn find_available_slots(
    query: &SlotQuery,
    busy: &[Interval],
    ranking: Ranking,
) -> SlotSelection {
    let candidates = generate_multi_day_slots(
        &time::start_of_day(&query.anchor_day),
        query.days,
        query.work_hours,
        query.duration_minutes,
        query.buffer_minutes,
    );
    let generated = candidates.len();

    let future = filter_future_slots(candidates, &query.now);
    let available = filter_conflicting_slots(future, busy);
    let total_available = available.len();

    tracing::debug!(
        "Slot search: {} generated, {} available, {} busy periods",
        generated,
        total_available,
        busy.len()
    );

    SlotSelection {
        slots: ranking.apply(available),
        total_available,
    }
}

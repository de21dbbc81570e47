//! Free slot search against a calendar provider, shared by the HTTP routes
//! and the `slots` command

use chrono::Duration;
use chrono_tz::Tz;

use super::{AppConfig, CalendarProvider};
use crate::scheduling::time::{now_in, parse_timezone};
use crate::scheduling::{
    Ranking, SchedulingError, SlotQuery, SlotSelection, WorkHours, busy_intervals,
    find_available_slots,
};

/// Parameters common to every slot search
#[derive(Debug, Clone)]
pub struct SlotSearch<'a> {
    pub days: u32,
    pub duration_min: u32,
    pub work_hours: (u32, u32),
    pub buffer_min: u32,
    pub calendar_id: Option<&'a str>,
    pub tz: Option<&'a str>,
}

impl SlotSearch<'_> {
    /// The requested time zone name, falling back to the configured default.
    pub fn tz_name(&self, config: &AppConfig) -> String {
        self.tz
            .map(str::to_string)
            .unwrap_or_else(|| config.default_tz.clone())
    }
}

#[derive(Debug)]
pub struct SlotSearchResult {
    pub time_zone: String,
    pub selection: SlotSelection,
}

/// Fetch busy periods for the next `days` days and run the slot pipeline.
///
/// `ranking` is built once the time zone is resolved, since proximity
/// ranking parses the requested start in that zone. Callers pick the error
/// type: the HTTP routes map failures to responses, the CLI reports them.
pub async fn search_free_slots<E, F>(
    config: &AppConfig,
    calendar: &dyn CalendarProvider,
    search: &SlotSearch<'_>,
    ranking: F,
) -> Result<SlotSearchResult, E>
where
    E: From<anyhow::Error> + From<SchedulingError>,
    F: FnOnce(Tz) -> Result<Ranking, E>,
{
    let work_hours = WorkHours::new(search.work_hours.0, search.work_hours.1)?;

    let tz_name = search.tz_name(config);
    let tz = parse_timezone(&tz_name)?;
    let ranking = ranking(tz)?;
    let calendar_id = search.calendar_id.unwrap_or(&config.default_calendar_id);

    let now = now_in(tz);
    let time_max = now + Duration::days(search.days.into());
    let busy = calendar
        .query_busy_periods(calendar_id, &now, &time_max, &tz_name)
        .await?;

    let query = SlotQuery {
        anchor_day: now,
        days: search.days,
        work_hours,
        duration_minutes: search.duration_min,
        buffer_minutes: search.buffer_min,
        now,
    };
    let selection = find_available_slots(&query, &busy_intervals(&busy, tz), ranking);

    Ok(SlotSearchResult {
        time_zone: tz_name,
        selection,
    })
}

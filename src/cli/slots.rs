use anyhow::Result;

use crate::api::public::availability::Slot;
use crate::core::AppConfig;
use crate::core::availability::{SlotSearch, search_free_slots};
use crate::core::logging::init_tracing;
use crate::google::GoogleCalendar;
use crate::scheduling::Ranking;

pub struct SlotsOptions {
    pub days: u32,
    pub duration: u32,
    pub buffer: u32,
    pub work_hours: (u32, u32),
    pub tz: Option<String>,
    pub calendar_id: Option<String>,
    pub limit: usize,
}

pub async fn run(opts: SlotsOptions) -> Result<()> {
    init_tracing();

    let config = AppConfig::from_env()?;
    let calendar = GoogleCalendar::from_config(&config)?;

    let search = SlotSearch {
        days: opts.days,
        duration_min: opts.duration,
        work_hours: opts.work_hours,
        buffer_min: opts.buffer,
        calendar_id: opts.calendar_id.as_deref(),
        tz: opts.tz.as_deref(),
    };
    let limit = opts.limit;
    let result = search_free_slots(&config, &calendar, &search, |_| {
        Ok::<_, anyhow::Error>(Ranking::Earliest { limit })
    })
    .await?;
    let selection = result.selection;

    let slots: Vec<Slot> = selection.slots.iter().map(Slot::from).collect();
    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({
            "timeZone": result.time_zone,
            "slots": slots,
            "totalAvailable": selection.total_available,
        }))?
    );

    Ok(())
}

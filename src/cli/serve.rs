use std::sync::Arc;

use anyhow::Result;

use crate::api;
use crate::core::AppConfig;
use crate::core::logging::init_tracing;
use crate::google::GoogleCalendar;

pub async fn run(host: String, port: String) -> Result<()> {
    init_tracing();

    let config = AppConfig::from_env()?;
    let calendar = GoogleCalendar::from_config(&config)?;
    api::serve(host, port, config, Arc::new(calendar)).await
}

use std::sync::Arc;

use crate::core::{AppConfig, CalendarProvider};

pub struct AppState {
    pub config: AppConfig,
    pub calendar: Arc<dyn CalendarProvider>,
    // Shared client for outbound webhook relays
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: AppConfig, calendar: Arc<dyn CalendarProvider>) -> Self {
        Self {
            config,
            calendar,
            http: reqwest::Client::new(),
        }
    }
}

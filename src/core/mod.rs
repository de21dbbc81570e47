pub mod availability;
pub mod config;
pub mod logging;
pub mod provider;

pub use config::AppConfig;
pub use provider::{CalendarProvider, CreatedEvent, EventNotFound, NewEvent};

use std::env;

use anyhow::{Context, Result};

use crate::scheduling::time::parse_timezone;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_secret_key: Option<String>,
    pub default_tz: String,
    pub default_calendar_id: String,
    pub booking_calendar_id: String,
    pub google_oauth_client_id: Option<String>,
    pub google_oauth_client_secret: Option<String>,
    pub google_oauth_refresh_token: Option<String>,
    pub google_service_account_email: Option<String>,
    pub google_private_key: Option<String>,
    pub google_api_base_url: String,
    pub google_token_url: String,
    pub bland_api_key: Option<String>,
    pub bland_api_url: String,
}

impl AppConfig {
    /// Read the configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let default_tz =
            env::var("TIMEZONE").unwrap_or_else(|_| "America/Los_Angeles".to_string());
        parse_timezone(&default_tz).context("TIMEZONE must be an IANA time zone name")?;

        let default_calendar_id = env::var("CALENDAR_ID").unwrap_or_else(|_| "primary".to_string());
        let booking_calendar_id =
            env::var("BOOKING_CALENDAR_ID").unwrap_or_else(|_| default_calendar_id.clone());

        let google_api_base_url = env::var("GOOGLE_API_BASE_URL")
            .unwrap_or_else(|_| "https://www.googleapis.com".to_string());
        let google_token_url = env::var("GOOGLE_TOKEN_URL")
            .unwrap_or_else(|_| "https://oauth2.googleapis.com/token".to_string());
        let bland_api_url = env::var("BLAND_API_URL")
            .unwrap_or_else(|_| "https://api.bland.ai/v1/calls".to_string());
        // Keys pasted into a single-line variable carry escaped newlines
        let google_private_key =
            non_empty_var("GOOGLE_PRIVATE_KEY").map(|key| key.replace("\\n", "\n"));

        Ok(Self {
            api_secret_key: non_empty_var("API_SECRET_KEY"),
            default_tz,
            default_calendar_id,
            booking_calendar_id,
            google_oauth_client_id: non_empty_var("GOOGLE_OAUTH_CLIENT_ID"),
            google_oauth_client_secret: non_empty_var("GOOGLE_OAUTH_CLIENT_SECRET"),
            google_oauth_refresh_token: non_empty_var("GOOGLE_OAUTH_REFRESH_TOKEN"),
            google_service_account_email: non_empty_var("GOOGLE_SERVICE_ACCOUNT_EMAIL"),
            google_private_key,
            google_api_base_url,
            google_token_url,
            bland_api_key: non_empty_var("BLANDAPIKEY"),
            bland_api_url,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_secret_key: None,
            default_tz: "America/Los_Angeles".to_string(),
            default_calendar_id: "primary".to_string(),
            booking_calendar_id: "primary".to_string(),
            google_oauth_client_id: None,
            google_oauth_client_secret: None,
            google_oauth_refresh_token: None,
            google_service_account_email: None,
            google_private_key: None,
            google_api_base_url: "https://www.googleapis.com".to_string(),
            google_token_url: "https://oauth2.googleapis.com/token".to_string(),
            bland_api_key: None,
            bland_api_url: "https://api.bland.ai/v1/calls".to_string(),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

//! Google Calendar API client for free/busy queries and booking events

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use super::oauth::{OAuthToken, refresh_access_token, service_account_token};
use crate::core::AppConfig;
use crate::core::provider::{CalendarProvider, CreatedEvent, EventNotFound, NewEvent};
use crate::scheduling::time::to_iso;
use crate::scheduling::{BusyPeriod, Instant};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FreeBusyRequest<'a> {
    time_min: String,
    time_max: String,
    time_zone: &'a str,
    items: Vec<FreeBusyItem<'a>>,
}

#[derive(Debug, Serialize)]
struct FreeBusyItem<'a> {
    id: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct FreeBusyResponse {
    pub calendars: Option<HashMap<String, FreeBusyCalendar>>,
}

#[derive(Debug, Deserialize)]
pub struct FreeBusyCalendar {
    pub busy: Option<Vec<BusyPeriod>>,
    pub errors: Option<Vec<FreeBusyError>>,
}

#[derive(Debug, Deserialize)]
pub struct FreeBusyError {
    pub domain: Option<String>,
    pub reason: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EventRequest {
    summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    start: EventDateTime,
    end: EventDateTime,
    conference_data: ConferenceRequest,
    #[serde(skip_serializing_if = "Option::is_none")]
    attendees: Option<Vec<EventAttendee>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EventDateTime {
    date_time: String,
    time_zone: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EventAttendee {
    email: String,
    response_status: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ConferenceRequest {
    create_request: CreateConferenceRequest,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateConferenceRequest {
    request_id: String,
    conference_solution_key: ConferenceSolutionKey,
}

#[derive(Debug, Serialize)]
struct ConferenceSolutionKey {
    r#type: String,
}

/// Event as returned by the Google API after insert
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertedEvent {
    pub id: String,
    pub html_link: Option<String>,
    pub conference_data: Option<ConferenceData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConferenceData {
    pub entry_points: Option<Vec<EntryPoint>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryPoint {
    pub entry_point_type: String,
    pub uri: Option<String>,
}

impl From<InsertedEvent> for CreatedEvent {
    fn from(event: InsertedEvent) -> Self {
        let meet_link = event
            .conference_data
            .and_then(|data| data.entry_points)
            .unwrap_or_default()
            .into_iter()
            .find(|entry| entry.entry_point_type == "video")
            .and_then(|entry| entry.uri);

        CreatedEvent {
            id: event.id,
            meet_link,
            html_link: event.html_link,
        }
    }
}

#[derive(Clone, Debug)]
pub struct OAuthCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

#[derive(Clone)]
pub struct ServiceAccountCredentials {
    pub client_email: String,
    pub private_key: String,
}

impl fmt::Debug for ServiceAccountCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountCredentials")
            .field("client_email", &self.client_email)
            .finish_non_exhaustive()
    }
}

/// How the client obtains access tokens.
#[derive(Clone, Debug)]
pub enum GoogleCredentials {
    OAuth(OAuthCredentials),
    ServiceAccount(ServiceAccountCredentials),
}

// Tokens are refreshed this many seconds before Google says they expire
const TOKEN_EXPIRY_MARGIN_SECS: i64 = 60;

#[derive(Clone, Debug)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

/// Calendar backed by a single Google account, authenticated with either an
/// OAuth refresh token or a service account key.
#[derive(Clone, Debug)]
pub struct GoogleCalendar {
    client: Client,
    base_url: String,
    token_url: String,
    credentials: GoogleCredentials,
    token_cache: Arc<Mutex<Option<CachedToken>>>,
}

impl GoogleCalendar {
    pub fn new(base_url: &str, token_url: &str, credentials: GoogleCredentials) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token_url: token_url.to_string(),
            credentials,
            token_cache: Arc::new(Mutex::new(None)),
        }
    }

    /// OAuth credentials win when both sets are configured.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let oauth = match (
            &config.google_oauth_client_id,
            &config.google_oauth_client_secret,
            &config.google_oauth_refresh_token,
        ) {
            (Some(client_id), Some(client_secret), Some(refresh_token)) => {
                Some(GoogleCredentials::OAuth(OAuthCredentials {
                    client_id: client_id.clone(),
                    client_secret: client_secret.clone(),
                    refresh_token: refresh_token.clone(),
                }))
            }
            _ => None,
        };
        let service_account = match (
            &config.google_service_account_email,
            &config.google_private_key,
        ) {
            (Some(client_email), Some(private_key)) => {
                Some(GoogleCredentials::ServiceAccount(ServiceAccountCredentials {
                    client_email: client_email.clone(),
                    private_key: private_key.clone(),
                }))
            }
            _ => None,
        };

        let credentials = oauth
            .or(service_account)
            .ok_or_else(|| anyhow!("No valid Google authentication credentials found"))?;

        Ok(Self::new(
            &config.google_api_base_url,
            &config.google_token_url,
            credentials,
        ))
    }

    pub fn credentials(&self) -> &GoogleCredentials {
        &self.credentials
    }

    async fn access_token(&self) -> Result<String> {
        if let Some(access_token) = self.cached_token() {
            return Ok(access_token);
        }

        let token = self
            .fetch_token()
            .await
            .map_err(|e| anyhow!("Google Calendar authentication failed: {}", e))?;
        let lifetime = token.expires_in.unwrap_or(0) - TOKEN_EXPIRY_MARGIN_SECS;
        let expires_at = Utc::now() + Duration::seconds(lifetime);
        if let Ok(mut cache) = self.token_cache.lock() {
            *cache = Some(CachedToken {
                access_token: token.access_token.clone(),
                expires_at,
            });
        }
        Ok(token.access_token)
    }

    fn cached_token(&self) -> Option<String> {
        let cache = self.token_cache.lock().ok()?;
        cache
            .as_ref()
            .filter(|token| token.expires_at > Utc::now())
            .map(|token| token.access_token.clone())
    }

    async fn fetch_token(&self) -> Result<OAuthToken> {
        match &self.credentials {
            GoogleCredentials::OAuth(oauth) => {
                refresh_access_token(
                    &self.client,
                    &self.token_url,
                    &oauth.client_id,
                    &oauth.client_secret,
                    &oauth.refresh_token,
                )
                .await
            }
            GoogleCredentials::ServiceAccount(account) => {
                service_account_token(
                    &self.client,
                    &self.token_url,
                    &account.client_email,
                    &account.private_key,
                )
                .await
            }
        }
    }

    fn events_url(&self, calendar_id: &str) -> String {
        format!(
            "{}/calendar/v3/calendars/{}/events",
            self.base_url,
            urlencoding::encode(calendar_id)
        )
    }
}

#[async_trait]
impl CalendarProvider for GoogleCalendar {
    async fn query_busy_periods(
        &self,
        calendar_id: &str,
        time_min: &Instant,
        time_max: &Instant,
        time_zone: &str,
    ) -> Result<Vec<BusyPeriod>> {
        let access_token = self.access_token().await?;
        let body = FreeBusyRequest {
            time_min: to_iso(time_min),
            time_max: to_iso(time_max),
            time_zone,
            items: vec![FreeBusyItem { id: calendar_id }],
        };

        let res = self
            .client
            .post(format!("{}/calendar/v3/freeBusy", self.base_url))
            .bearer_auth(access_token)
            .json(&body)
            .send()
            .await?;
        let status = res.status();
        let text = res.text().await.unwrap_or_default();
        if !status.is_success() {
            anyhow::bail!("Free/busy query failed: {} ({})", status, text);
        }

        let resp: FreeBusyResponse = serde_json::from_str(&text)?;
        let Some(calendar) = resp.calendars.and_then(|mut c| c.remove(calendar_id)) else {
            return Ok(Vec::new());
        };
        if let Some(errors) = &calendar.errors {
            tracing::warn!("Free/busy errors for calendar {}: {:?}", calendar_id, errors);
        }

        Ok(calendar.busy.unwrap_or_default())
    }

    async fn insert_event(&self, calendar_id: &str, event: NewEvent) -> Result<CreatedEvent> {
        let access_token = self.access_token().await?;
        let body = EventRequest {
            summary: event.summary,
            description: event.description,
            start: EventDateTime {
                date_time: to_iso(&event.start),
                time_zone: event.time_zone.clone(),
            },
            end: EventDateTime {
                date_time: to_iso(&event.end),
                time_zone: event.time_zone,
            },
            conference_data: ConferenceRequest {
                create_request: CreateConferenceRequest {
                    request_id: format!("meet-{}", uuid::Uuid::new_v4().simple()),
                    conference_solution_key: ConferenceSolutionKey {
                        r#type: "hangoutsMeet".to_string(),
                    },
                },
            },
            attendees: event.attendee_email.map(|email| {
                vec![EventAttendee {
                    email,
                    response_status: "needsAction".to_string(),
                }]
            }),
        };

        let res = self
            .client
            .post(self.events_url(calendar_id))
            .query(&[("conferenceDataVersion", "1")])
            .bearer_auth(access_token)
            .json(&body)
            .send()
            .await?;
        let status = res.status();
        let text = res.text().await.unwrap_or_default();
        if !status.is_success() {
            anyhow::bail!("Event insert failed: {} ({})", status, text);
        }

        let inserted: InsertedEvent = serde_json::from_str(&text)?;
        let created = CreatedEvent::from(inserted);
        if created.meet_link.is_none() {
            tracing::warn!("Google Meet link not found in event response");
        }
        Ok(created)
    }

    async fn delete_event(&self, calendar_id: &str, event_id: &str) -> Result<()> {
        let access_token = self.access_token().await?;
        let url = format!(
            "{}/{}",
            self.events_url(calendar_id),
            urlencoding::encode(event_id)
        );

        let res = self.client.delete(&url).bearer_auth(access_token).send().await?;
        let status = res.status();
        if status == StatusCode::NOT_FOUND || status == StatusCode::GONE {
            return Err(EventNotFound {
                calendar_id: calendar_id.to_string(),
                event_id: event_id.to_string(),
            }
            .into());
        }
        if !status.is_success() {
            let text = res.text().await.unwrap_or_default();
            anyhow::bail!("Event delete failed: {} ({})", status, text);
        }
        Ok(())
    }
}

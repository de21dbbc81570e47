//! Router for the webhook API

use std::sync::Arc;

use anyhow::anyhow;
use axum::{Json, Router, extract::State};

use super::public::{Lead, LeadWebhookResponse};
use crate::api::public::ApiError;
use crate::api::state::AppState;
use crate::api::utils::JsonBody;
use crate::calls::initiate_call;

type SharedState = Arc<AppState>;

/// Handle new leads from the lead capture integration by asking the
/// calling service to phone them
async fn lead_webhook(
    State(state): State<SharedState>,
    JsonBody(lead): JsonBody<Lead>,
) -> Result<Json<LeadWebhookResponse>, ApiError> {
    tracing::info!("Received lead: {:?}", lead);

    let api_key = state
        .config
        .bland_api_key
        .as_deref()
        .ok_or_else(|| anyhow!("BLANDAPIKEY not configured"))?;

    let resp = initiate_call(&state.http, &state.config.bland_api_url, api_key, &lead).await?;

    Ok(Json(LeadWebhookResponse {
        success: true,
        message: "Conversation initiated with Bland AI".to_string(),
        data: lead,
        bland_ai: resp,
    }))
}

/// Create the webhook router
pub fn router() -> Router<SharedState> {
    Router::new().route("/", axum::routing::post(lead_webhook))
}

//! Public types for the webhook API
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use crate::calls::Lead;

#[derive(Debug, Serialize, Deserialize)]
pub struct LeadWebhookResponse {
    pub success: bool,
    pub message: String,
    pub data: Lead,
    #[serde(rename = "blandAI")]
    pub bland_ai: Value,
}

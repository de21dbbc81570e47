//! Outbound calling service client used to phone new leads

use anyhow::Result;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A lead forwarded from the lead capture webhook
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    pub phone_number: String,
    pub lead_name: String,
    pub lead_email: String,
    pub preferred_datetime_raw: Option<String>,
    pub lead_phone: Option<String>,
    pub lead_message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CallRequest {
    pub phone_number: String,
    pub task: String,
    pub voice: String,
    pub request_data: CallRequestData,
    pub answering_machine_detection: bool,
}

#[derive(Debug, Serialize)]
pub struct CallRequestData {
    pub lead_name: String,
    pub lead_email: String,
    pub preferred_datetime_raw: String,
    pub lead_phone: String,
    pub lead_message: String,
}

impl From<&Lead> for CallRequest {
    fn from(lead: &Lead) -> Self {
        CallRequest {
            phone_number: lead.phone_number.clone(),
            task: "Schedule consultation with Facebook lead".to_string(),
            voice: "mason".to_string(),
            request_data: CallRequestData {
                lead_name: lead.lead_name.clone(),
                lead_email: lead.lead_email.clone(),
                preferred_datetime_raw: lead.preferred_datetime_raw.clone().unwrap_or_default(),
                lead_phone: lead
                    .lead_phone
                    .clone()
                    .unwrap_or_else(|| lead.phone_number.clone()),
                lead_message: lead
                    .lead_message
                    .clone()
                    .unwrap_or_else(|| "Lead interested in scheduling consultation".to_string()),
            },
            answering_machine_detection: false,
        }
    }
}

/// Ask the calling service to phone `lead`. Returns the service's JSON
/// response as is.
pub async fn initiate_call(
    client: &Client,
    api_url: &str,
    api_key: &str,
    lead: &Lead,
) -> Result<Value> {
    let res = client
        .post(api_url)
        .bearer_auth(api_key)
        .json(&CallRequest::from(lead))
        .send()
        .await?;
    let status = res.status();
    if !status.is_success() {
        let text = res.text().await.unwrap_or_default();
        anyhow::bail!("Calling service error: {} ({})", status, text);
    }
    let body: Value = res.json().await?;
    tracing::info!("Call initiated for {}: {}", lead.phone_number, body);
    Ok(body)
}

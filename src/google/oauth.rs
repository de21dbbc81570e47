//! Google OAuth 2.0 token exchange

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const CALENDAR_SCOPE: &str = "https://www.googleapis.com/auth/calendar";
pub const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

#[derive(Debug, Deserialize)]
pub struct OAuthToken {
    pub access_token: String,
    pub expires_in: Option<i64>,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
    pub token_type: Option<String>,
}

/// Claims of the signed assertion a service account trades for a token.
#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceAccountClaims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

/// Consent screen URL that yields a refresh token for calendar access.
pub fn authorization_url(client_id: &str, redirect_uri: &str) -> String {
    format!(
        "{}?client_id={}&redirect_uri={}&response_type=code&scope={}\
         &access_type=offline&prompt=consent",
        AUTH_URL,
        urlencoding::encode(client_id),
        urlencoding::encode(redirect_uri),
        urlencoding::encode(CALENDAR_SCOPE)
    )
}

pub async fn exchange_code_for_token(
    client: &Client,
    token_url: &str,
    client_id: &str,
    client_secret: &str,
    code: &str,
    redirect_uri: &str,
) -> Result<OAuthToken> {
    let params = [
        ("client_id", client_id),
        ("client_secret", client_secret),
        ("code", code),
        ("redirect_uri", redirect_uri),
        ("grant_type", "authorization_code"),
    ];
    request_token(client, token_url, &params).await
}

pub async fn refresh_access_token(
    client: &Client,
    token_url: &str,
    client_id: &str,
    client_secret: &str,
    refresh_token: &str,
) -> Result<OAuthToken> {
    let params = [
        ("client_id", client_id),
        ("client_secret", client_secret),
        ("refresh_token", refresh_token),
        ("grant_type", "refresh_token"),
    ];
    request_token(client, token_url, &params).await
}

/// Sign an RS256 assertion for `client_email`, valid for one hour from
/// `issued_at`. `private_key` is the PEM from the service account's key file.
pub fn service_account_assertion(
    client_email: &str,
    private_key: &str,
    token_url: &str,
    issued_at: DateTime<Utc>,
) -> Result<String> {
    let key = EncodingKey::from_rsa_pem(private_key.as_bytes())?;
    let claims = ServiceAccountClaims {
        iss: client_email.to_string(),
        scope: CALENDAR_SCOPE.to_string(),
        aud: token_url.to_string(),
        iat: issued_at.timestamp(),
        exp: (issued_at + Duration::hours(1)).timestamp(),
    };
    let jwt = encode(&Header::new(Algorithm::RS256), &claims, &key)?;
    Ok(jwt)
}

pub async fn service_account_token(
    client: &Client,
    token_url: &str,
    client_email: &str,
    private_key: &str,
) -> Result<OAuthToken> {
    let assertion = service_account_assertion(client_email, private_key, token_url, Utc::now())?;
    let params = [("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())];
    request_token(client, token_url, &params).await
}

async fn request_token(
    client: &Client,
    token_url: &str,
    params: &[(&str, &str)],
) -> Result<OAuthToken> {
    let res = client.post(token_url).form(params).send().await?;
    let status = res.status();
    let text = res.text().await.unwrap_or_default();
    if !status.is_success() {
        anyhow::bail!("Token request failed: {} ({})", status, text);
    }
    let token: OAuthToken = serde_json::from_str(&text)?;
    Ok(token)
}

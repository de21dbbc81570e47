use anyhow::{Result, anyhow};
use reqwest::Client;
use std::io::{self, Write};

use crate::core::AppConfig;
use crate::google::oauth::{authorization_url, exchange_code_for_token};

pub async fn run(redirect_uri: &str) -> Result<()> {
    let config = AppConfig::from_env()?;
    let client_id = config
        .google_oauth_client_id
        .ok_or(anyhow!("Set GOOGLE_OAUTH_CLIENT_ID in your environment"))?;
    let client_secret = config
        .google_oauth_client_secret
        .ok_or(anyhow!("Set GOOGLE_OAUTH_CLIENT_SECRET in your environment"))?;

    println!(
        "\nPlease open the following URL in your browser and authorize access:\n\n{}\n",
        authorization_url(&client_id, redirect_uri)
    );
    print!("Paste the authorization code shown by Google here: ");
    io::stdout().flush()?;
    let mut code = String::new();
    io::stdin().read_line(&mut code)?;
    let code = code.trim();

    let token = exchange_code_for_token(
        &Client::new(),
        &config.google_token_url,
        &client_id,
        &client_secret,
        code,
        redirect_uri,
    )
    .await?;
    let refresh_token = token
        .refresh_token
        .ok_or(anyhow!("No refresh token in response"))?;

    println!("\nAdd this to your environment and restart the server:\n");
    println!("GOOGLE_OAUTH_REFRESH_TOKEN={}", refresh_token);

    Ok(())
}

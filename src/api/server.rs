use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::routes;
use crate::api::state::AppState;
use crate::core::{AppConfig, CalendarProvider};

pub fn app(shared_state: Arc<AppState>) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        // API routes
        .nest("/api", routes::router(Arc::clone(&shared_state)))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(shared_state)
}

// Run the server
pub async fn serve(
    host: String,
    port: String,
    config: AppConfig,
    calendar: Arc<dyn CalendarProvider>,
) -> Result<()> {
    if config.api_secret_key.is_none() {
        tracing::warn!("API_SECRET_KEY is not set, calendar routes will reject every request");
    }

    let app_state = AppState::new(config, calendar);
    let app = app(Arc::new(app_state));

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", host, port))?;

    tracing::debug!("Server started. Listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}

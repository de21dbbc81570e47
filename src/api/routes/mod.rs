//! API routes module

pub mod availability;
pub mod book;
pub mod cancel;
pub mod suggest;
pub mod webhook;

use std::sync::Arc;

use axum::{Router, middleware};

use crate::api::state::AppState;
use crate::api::utils::require_api_key;

type SharedState = Arc<AppState>;

/// Create the combined API router
pub fn router(shared_state: SharedState) -> Router<SharedState> {
    // Everything touching the calendar needs the API key
    let calendar_routes = Router::new()
        // Open slots, soonest first
        .nest("/availability", availability::router())
        // Open slots near a requested time
        .nest("/suggest", suggest::router())
        // Create events
        .nest("/book", book::router())
        // Delete events
        .nest("/cancel", cancel::router())
        .route_layer(middleware::from_fn_with_state(shared_state, require_api_key));

    Router::new()
        .merge(calendar_routes)
        // Lead capture webhook
        .nest("/webhook", webhook::router())
}

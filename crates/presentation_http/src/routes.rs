//! Route definitions

use axum::{Router, routing::get};

use crate::{handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/api/weather", get(handlers::weather::proxy_default))
        .route(
            "/api/weather/{endpoint}",
            get(handlers::weather::proxy_endpoint),
        )
        .fallback(handlers::not_found)
        .with_state(state)
}

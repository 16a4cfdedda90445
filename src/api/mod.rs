//! API route definitions
//!
//! The primary API is GraphQL at /graphql, with subscriptions over
//! WebSocket at /graphql/ws. Health probes live at /healthz and /readyz.

pub mod graphql;
pub mod health;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Build the full application router
pub fn router(state: AppState) -> Router {
    Router::new()
        // Health endpoints (no auth required)
        .merge(health::router())
        // GraphQL endpoint (handles all queries, mutations, subscriptions)
        .merge(graphql::router())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

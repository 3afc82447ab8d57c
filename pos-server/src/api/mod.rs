//! API routing module
//!
//! # Structure
//!
//! - [`health`] - service info and health check
//! - [`categories`] - service category management
//! - [`clients`] - client management
//! - [`prices`] - weight-tiered price rules and price calculation
//! - [`orders`] - order management and the integrated order workflow
//!
//! Resource routes are nested under `/api/v1`; handlers return entities as
//! plain JSON, errors as the unified [`shared::ApiResponse`] envelope.

use axum::Router;
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

pub mod categories;
pub mod clients;
pub mod health;
pub mod orders;
pub mod prices;

/// Common pagination query parameters for list endpoints
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    100
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(categories::router())
        .merge(clients::router())
        .merge(orders::router())
        .merge(prices::router())
}

/// Build the fully configured application with middleware and state
pub fn build_app(state: ServerState) -> Router {
    build_router()
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

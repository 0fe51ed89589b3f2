//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /health`                          - Health check (public)
//! - `/brands`, `/types`, `/cars`, `/rents` - Resource collections
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket
//! - **Authentication** - Bearer JWT, attached per route by the access policy
//! - **Path normalization** - Trailing slash handling

use crate::api::middleware::{rate_limit, tracing};
use crate::api::routes::api_router;
use crate::state::AppState;
use axum::Router;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// The rate limiter keys on the peer address, so the result must be served
/// with connect info (see [`crate::server::run`]).
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = api_router(state)
        .layer(rate_limit::layer())
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}

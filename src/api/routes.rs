//! API route configuration.
//!
//! Every resource is mounted from its [`ApiResource`] description; the access
//! policy decides per route whether [`crate::api::middleware::auth`] runs.

use axum::{
    Router, middleware,
    routing::{MethodRouter, get, patch, post, put},
};

use crate::api::handlers::{
    count_handler, create_handler, find_one_handler, health_handler, list_handler,
    method_not_allowed, update_handler,
};
use crate::api::middleware::auth;
use crate::api::resources::{Access, ApiResource};
use crate::domain::entities::{Brands, CarTypes, Cars, Rents};
use crate::state::AppState;

/// All API routes with their state attached.
///
/// # Endpoints
///
/// - `GET /health` - Database connectivity and version (public)
/// - `/brands`, `/types`, `/cars`, `/rents` - see [`resource_routes`]
///
/// Rate limiting, tracing and path normalization are applied by
/// [`crate::routes::app_router`].
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler).fallback(method_not_allowed))
        .nest(Brands::PATH, resource_routes::<Brands>(&state))
        .nest(CarTypes::PATH, resource_routes::<CarTypes>(&state))
        .nest(Cars::PATH, resource_routes::<Cars>(&state))
        .nest(Rents::PATH, resource_routes::<Rents>(&state))
        .with_state(state)
}

/// Routes for one resource collection.
///
/// - `POST  /`        - Create (bearer)
/// - `GET   /`        - List with filters, sort and window
/// - `GET   /count`   - Count matching records
/// - `GET   /{id}`    - Fetch one record
/// - `PATCH /{id}`    - Partial update (bearer)
/// - `PUT   /{id}`    - Same as `PATCH`, if the policy allows it (bearer)
///
/// Any other verb on these paths answers `405 Method not allowed`.
pub fn resource_routes<R: ApiResource>(state: &AppState) -> Router<AppState> {
    let policy = R::POLICY;

    let collection = guarded(get(list_handler::<R>), policy.list, state)
        .merge(guarded(post(create_handler::<R>), Access::Bearer, state))
        .fallback(method_not_allowed);

    let count = guarded(get(count_handler::<R>), policy.count, state).fallback(method_not_allowed);

    let mut item = guarded(get(find_one_handler::<R>), policy.fetch, state)
        .merge(guarded(patch(update_handler::<R>), Access::Bearer, state));
    if policy.replace {
        item = item.merge(guarded(put(update_handler::<R>), Access::Bearer, state));
    }

    Router::new()
        .route("/", collection)
        .route("/count", count)
        .route("/{id}", item.fallback(method_not_allowed))
}

fn guarded(
    route: MethodRouter<AppState>,
    access: Access,
    state: &AppState,
) -> MethodRouter<AppState> {
    match access {
        Access::Public => route,
        Access::Bearer => {
            route.route_layer(middleware::from_fn_with_state(state.clone(), auth::layer))
        }
    }
}

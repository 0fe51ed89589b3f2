//! Bearer token authentication middleware.
//!
//! Attached per method by [`crate::api::routes`] wherever the resource's
//! access policy asks for a token. Handlers behind it read the acting user
//! with `Extension<Actor>`.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use serde_json::json;

use crate::domain::entities::Actor;
use crate::{error::AppError, state::AppState};

/// Verifies `Authorization: Bearer <jwt>` and stores the [`Actor`] in the
/// request extensions.
///
/// # Errors
///
/// `401 Unauthorized` (with `WWW-Authenticate: Bearer`) when the header is
/// missing or malformed, or the token is expired, badly signed or has no
/// subject.
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "Authorization header is missing or invalid" }),
            )
        })?;

    let actor: Actor = st.auth_service.authenticate(&token).inspect_err(|e| {
        tracing::debug!(error = %e, path = %parts.uri.path(), "Rejected bearer token");
    })?;

    parts.extensions.insert(actor);
    Ok(next.run(Request::from_parts(parts, body)).await)
}

//! Handlers shared by every resource collection.
//!
//! Each handler extracts the actor, body, query or path, calls the matching
//! [`crate::application::services::ResourceService`] operation and renders
//! the result through the resource's response DTO.

use std::collections::HashMap;

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::json;

use crate::api::extract::ResourceBody;
use crate::api::resources::ApiResource;
use crate::domain::entities::Actor;
use crate::domain::query::{Page, SearchQuery};
use crate::error::AppError;
use crate::state::AppState;

/// `POST /{resource}`: creates a record owned by the acting user.
///
/// # Response
///
/// `201 Created` with the public projection of the new record.
pub async fn create_handler<R: ApiResource>(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    body: ResourceBody<R::CreateRequest>,
) -> Result<(StatusCode, Json<R::Response>), AppError> {
    let entity = R::service(&state)
        .create(body.data.into(), &body.uploads, &actor)
        .await?;

    Ok((StatusCode::CREATED, Json(entity.into())))
}

/// `GET /{resource}`: lists records matching the query parameters.
///
/// ```json
/// {"data": [...], "pagination": {"total": 42, "limit": 10, "skip": 0}}
/// ```
///
/// `pagination` is present only when `?pagination=true`.
pub async fn list_handler<R: ApiResource>(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Page<R::Response>>, AppError> {
    let query = SearchQuery::parse(&params, R::FILTERS, R::SORTS)?;
    let page = R::service(&state).find_all(&query).await?;

    Ok(Json(page.map(Into::into)))
}

/// `GET /{resource}/count`: number of records matching the filters.
///
/// Window and pagination parameters are accepted but do not affect the count.
pub async fn count_handler<R: ApiResource>(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<i64>, AppError> {
    let query = SearchQuery::parse(&params, R::FILTERS, R::SORTS)?;
    let total = R::service(&state).count(&query).await?;

    Ok(Json(total))
}

/// `GET /{resource}/{id}`
pub async fn find_one_handler<R: ApiResource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<R::Response>, AppError> {
    let id = parse_id(&id)?;
    let entity = R::service(&state).find_one(id).await?;

    Ok(Json(entity.into()))
}

/// `PATCH`/`PUT /{resource}/{id}`: merges the provided fields.
pub async fn update_handler<R: ApiResource>(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
    body: ResourceBody<R::UpdateRequest>,
) -> Result<Json<R::Response>, AppError> {
    let id = parse_id(&id)?;
    let entity = R::service(&state)
        .update(id, body.data.into(), &body.uploads, &actor)
        .await?;

    Ok(Json(entity.into()))
}

/// Answers every verb a route does not allow.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::bad_request("Invalid id", json!({ "id": raw })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert!(parse_id("abc").is_err());
        assert!(parse_id("0").is_err());
        assert!(parse_id("-3").is_err());
    }
}

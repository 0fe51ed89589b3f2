//! Generic create/read/update service shared by every resource.

use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{Actor, Stamp};
use crate::domain::query::{Page, SearchQuery};
use crate::domain::repositories::ResourceRepository;
use crate::domain::resource::{Resource, Uploads};
use crate::error::AppError;

/// Attempts made to insert a record whose minted codes keep colliding.
const MAX_MINT_ATTEMPTS: usize = 10;

/// Service for one resource collection.
///
/// Stamps audit fields, enforces the upload policy and the resource's own
/// admission rules, and turns missing records into [`AppError::NotFound`].
pub struct ResourceService<R: Resource, S: ResourceRepository<R>> {
    repository: Arc<S>,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource, S: ResourceRepository<R>> ResourceService<R, S> {
    /// Creates a new service over a repository.
    pub fn new(repository: Arc<S>) -> Self {
        Self {
            repository,
            _resource: PhantomData,
        }
    }

    /// Creates a record on behalf of `actor`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if a file was uploaded or the resource
    /// refuses the draft (e.g. renting one's own car).
    ///
    /// Returns [`AppError::Conflict`] on a unique violation that is not a minted
    /// code, and [`AppError::Internal`] once minted codes collided
    /// `MAX_MINT_ATTEMPTS` times.
    pub async fn create(
        &self,
        draft: R::Draft,
        uploads: &Uploads,
        actor: &Actor,
    ) -> Result<R::Entity, AppError> {
        reject_uploads::<R>(uploads)?;

        let stamp = Stamp::by(actor);
        for attempt in 1..=MAX_MINT_ATTEMPTS {
            let record = R::admit(&draft, actor)?;

            match self.repository.create(record, &stamp).await {
                Ok(entity) => {
                    tracing::info!(
                        resource = R::NAME,
                        id = R::id(&entity),
                        user = %actor.id,
                        "Record created"
                    );
                    return Ok(entity);
                }
                Err(e) if R::MINTED_CONSTRAINTS.iter().any(|c| e.is_conflict_on(c)) => {
                    tracing::warn!(resource = R::NAME, attempt, "minted code collision, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::internal(
            "Failed to generate unique code",
            json!({ "reason": "Too many collisions" }),
        ))
    }

    /// Merges `patch` onto an existing, non-deleted record.
    ///
    /// The record is looked up before the upload policy is checked, so a
    /// missing id is reported as not found whatever the body holds.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the record does not exist or is
    /// soft-deleted, and [`AppError::Validation`] if a file was uploaded.
    pub async fn update(
        &self,
        id: i64,
        patch: R::Patch,
        uploads: &Uploads,
        actor: &Actor,
    ) -> Result<R::Entity, AppError> {
        if self.repository.find_by_id(id).await?.is_none() {
            return Err(not_found::<R>(id));
        }

        reject_uploads::<R>(uploads)?;

        let entity = self
            .repository
            .update(id, patch, &Stamp::by(actor))
            .await?
            .ok_or_else(|| not_found::<R>(id))?;

        tracing::info!(resource = R::NAME, id, user = %actor.id, "Record updated");
        Ok(entity)
    }

    /// Lists matching records, with totals when the query asks to paginate.
    pub async fn find_all(&self, query: &SearchQuery) -> Result<Page<R::Entity>, AppError> {
        let data = self.repository.find_all(query).await?;

        let pagination = if query.paginate {
            Some(query.page_info(self.repository.count(query).await?))
        } else {
            None
        };

        Ok(Page { data, pagination })
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no non-deleted record has this id.
    pub async fn find_one(&self, id: i64) -> Result<R::Entity, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found::<R>(id))
    }

    pub async fn count(&self, query: &SearchQuery) -> Result<i64, AppError> {
        self.repository.count(query).await
    }
}

fn not_found<R: Resource>(id: i64) -> AppError {
    AppError::not_found(format!("Could not find {}.", R::NAME), json!({ "id": id }))
}

/// File uploads are not supported: any file part fails the request.
fn reject_uploads<R: Resource>(uploads: &Uploads) -> Result<(), AppError> {
    let Some(field) = uploads.fields().first() else {
        return Ok(());
    };

    if R::FILE_FIELDS.contains(&field.as_str()) {
        Err(AppError::bad_request(
            "Currently we do not provide file service.",
            json!({ "field": field }),
        ))
    } else {
        Err(AppError::bad_request(
            "Unexpected file field",
            json!({ "field": field, "allowed": R::FILE_FIELDS }),
        ))
    }
}

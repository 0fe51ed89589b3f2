//! Repository trait shared by every resource.

use async_trait::async_trait;

use crate::domain::entities::Stamp;
use crate::domain::query::SearchQuery;
use crate::domain::resource::Resource;
use crate::error::AppError;

/// Storage contract for one resource collection.
///
/// Every read and update ignores soft-deleted rows, so a record with
/// `is_deleted = TRUE` behaves as if it did not exist.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgBrandRepository`]
/// - [`crate::infrastructure::persistence::PgCarTypeRepository`]
/// - [`crate::infrastructure::persistence::PgCarRepository`]
/// - [`crate::infrastructure::persistence::PgRentRepository`]
///
/// # Examples
///
/// See integration tests: `tests/repository_resources.rs`
#[async_trait]
pub trait ResourceRepository<R: Resource>: Send + Sync {
    /// Inserts a record stamped with `stamp` as its creator.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] on a unique violation (the constraint
    /// name is in the details), [`AppError::Validation`] when a referenced
    /// record is missing, [`AppError::Internal`] on other database errors.
    async fn create(&self, record: R::Insert, stamp: &Stamp) -> Result<R::Entity, AppError>;

    /// Finds a live record by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<R::Entity>, AppError>;

    /// Merges the provided fields onto a live record and stamps the updater.
    ///
    /// Returns `None` when no live record has this id.
    ///
    /// # Errors
    ///
    /// Same as [`ResourceRepository::create`].
    async fn update(
        &self,
        id: i64,
        patch: R::Patch,
        stamp: &Stamp,
    ) -> Result<Option<R::Entity>, AppError>;

    /// Lists live records matching the query, honouring its sort and window.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_all(&self, query: &SearchQuery) -> Result<Vec<R::Entity>, AppError>;

    /// Counts live records matching the query's filters, ignoring its window.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count(&self, query: &SearchQuery) -> Result<i64, AppError>;
}

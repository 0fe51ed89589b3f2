//! Per-resource description consumed by the generic service, repository and
//! HTTP layers.
//!
//! A [`Resource`] names the entity and its input shapes, the fields that may be
//! filtered or sorted on, the fields under which a file upload would be
//! expected, and the hook that turns a validated draft into a storable record.

use std::fmt::Debug;

use crate::domain::entities::Actor;
use crate::domain::query::{FilterField, SortField};
use crate::error::AppError;

pub trait Resource: Send + Sync + 'static {
    /// Persisted entity as read back from storage.
    type Entity: Debug + Clone + Send + Sync + 'static;
    /// Validated creation input.
    type Draft: Debug + Clone + Send + Sync + 'static;
    /// Creation input completed with server-assigned fields.
    type Insert: Debug + Send + Sync + 'static;
    /// Partial update; `None` leaves a field unchanged.
    type Patch: Debug + Send + Sync + 'static;

    /// Singular name used in messages and logs.
    const NAME: &'static str;
    /// Multipart fields that would carry a file.
    const FILE_FIELDS: &'static [&'static str];
    const FILTERS: &'static [FilterField];
    const SORTS: &'static [SortField];
    /// Unique constraints guarding minted codes. A violation on one of these
    /// is retried with freshly minted values.
    const MINTED_CONSTRAINTS: &'static [&'static str] = &[];

    fn id(entity: &Self::Entity) -> i64;

    /// Completes a draft on behalf of `actor`.
    ///
    /// Called once per insert attempt, so minted values differ between retries.
    fn admit(draft: &Self::Draft, actor: &Actor) -> Result<Self::Insert, AppError>;
}

/// Names of multipart fields that carried a file in the request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Uploads(Vec<String>);

impl Uploads {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>) {
        self.0.push(field.into());
    }

    pub fn fields(&self) -> &[String] {
        &self.0
    }
}

impl<S: Into<String>> FromIterator<S> for Uploads {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

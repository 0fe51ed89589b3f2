//! Car type (category) entity, e.g. "SUV" or "Sedan".

use crate::domain::entities::{Actor, Audit, Media};
use crate::domain::query::{FilterField, SortField};
use crate::domain::resource::Resource;
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq)]
pub struct CarType {
    pub id: i64,
    pub name: String,
    pub image: Option<Media>,
    pub audit: Audit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCarType {
    pub name: String,
    pub image: Option<Media>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CarTypePatch {
    pub name: Option<String>,
    pub image: Option<Media>,
    pub is_active: Option<bool>,
    pub is_deleted: Option<bool>,
}

/// Resource marker for `/types`.
pub struct CarTypes;

impl Resource for CarTypes {
    type Entity = CarType;
    type Draft = NewCarType;
    type Insert = NewCarType;
    type Patch = CarTypePatch;

    const NAME: &'static str = "type";
    const FILE_FIELDS: &'static [&'static str] = &["image"];
    const FILTERS: &'static [FilterField] = &[
        FilterField::text("name", "name"),
        FilterField::boolean("isActive", "is_active"),
    ];
    const SORTS: &'static [SortField] = &[
        SortField::new("_id", "id"),
        SortField::new("name", "name"),
        SortField::new("cTime", "c_time"),
        SortField::new("uTime", "u_time"),
    ];

    fn id(entity: &CarType) -> i64 {
        entity.id
    }

    fn admit(draft: &NewCarType, _actor: &Actor) -> Result<NewCarType, AppError> {
        Ok(draft.clone())
    }
}

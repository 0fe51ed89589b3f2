//! Car brand entity.

use crate::domain::entities::{Actor, Audit, Media};
use crate::domain::query::{FilterField, SortField};
use crate::domain::resource::Resource;
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq)]
pub struct Brand {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub image: Option<Media>,
    pub audit: Audit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewBrand {
    pub name: String,
    pub description: Option<String>,
    pub image: Option<Media>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrandPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<Media>,
    pub is_active: Option<bool>,
    pub is_deleted: Option<bool>,
}

/// Resource marker for `/brands`.
pub struct Brands;

impl Resource for Brands {
    type Entity = Brand;
    type Draft = NewBrand;
    type Insert = NewBrand;
    type Patch = BrandPatch;

    const NAME: &'static str = "brand";
    const FILE_FIELDS: &'static [&'static str] = &["image"];
    const FILTERS: &'static [FilterField] = &[
        FilterField::text("name", "name"),
        FilterField::text("description", "description"),
        FilterField::boolean("isActive", "is_active"),
    ];
    const SORTS: &'static [SortField] = &[
        SortField::new("_id", "id"),
        SortField::new("name", "name"),
        SortField::new("cTime", "c_time"),
        SortField::new("uTime", "u_time"),
    ];

    fn id(entity: &Brand) -> i64 {
        entity.id
    }

    fn admit(draft: &NewBrand, _actor: &Actor) -> Result<NewBrand, AppError> {
        Ok(draft.clone())
    }
}

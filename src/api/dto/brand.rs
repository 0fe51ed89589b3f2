//! DTOs for `/brands`.

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, PickFirst, serde_as};
use validator::Validate;

use crate::domain::entities::{Brand, BrandPatch, Media, NewBrand};

/// Request body for `POST /brands`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateBrandRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    #[validate(nested)]
    pub image: Option<Media>,
}

impl From<CreateBrandRequest> for NewBrand {
    fn from(req: CreateBrandRequest) -> Self {
        NewBrand {
            name: req.name,
            description: req.description,
            image: req.image,
        }
    }
}

/// Request body for `PATCH`/`PUT /brands/{id}`.
///
/// Only provided fields are changed. `isDeleted: true` soft-deletes the brand.
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateBrandRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    #[validate(nested)]
    pub image: Option<Media>,

    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub is_active: Option<bool>,

    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub is_deleted: Option<bool>,
}

impl From<UpdateBrandRequest> for BrandPatch {
    fn from(req: UpdateBrandRequest) -> Self {
        BrandPatch {
            name: req.name,
            description: req.description,
            image: req.image,
            is_active: req.is_active,
            is_deleted: req.is_deleted,
        }
    }
}

/// Public projection of a brand.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandResponse {
    #[serde(rename = "_id")]
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub image: Option<Media>,
    pub is_active: bool,
}

impl From<Brand> for BrandResponse {
    fn from(brand: Brand) -> Self {
        BrandResponse {
            id: brand.id,
            name: brand.name,
            description: brand.description,
            image: brand.image,
            is_active: brand.audit.is_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_update_accepts_string_flags() {
        let req: UpdateBrandRequest =
            serde_json::from_value(json!({ "isDeleted": "true", "isActive": false })).unwrap();

        assert_eq!(req.is_deleted, Some(true));
        assert_eq!(req.is_active, Some(false));
        assert!(req.name.is_none());
    }

    #[test]
    fn test_create_rejects_unknown_fields() {
        let result =
            serde_json::from_value::<CreateBrandRequest>(json!({ "name": "BMW", "cBy": "x" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_create_validates_image_url() {
        let req: CreateBrandRequest =
            serde_json::from_value(json!({ "name": "BMW", "image": { "url": "nope" } })).unwrap();
        assert!(req.validate().is_err());
    }
}

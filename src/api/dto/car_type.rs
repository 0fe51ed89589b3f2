//! DTOs for `/types`.

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, PickFirst, serde_as};
use validator::Validate;

use crate::domain::entities::{CarType, CarTypePatch, Media, NewCarType};

/// Request body for `POST /types`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateCarTypeRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[serde(default)]
    #[validate(nested)]
    pub image: Option<Media>,
}

impl From<CreateCarTypeRequest> for NewCarType {
    fn from(req: CreateCarTypeRequest) -> Self {
        NewCarType {
            name: req.name,
            image: req.image,
        }
    }
}

/// Request body for `PATCH`/`PUT /types/{id}`.
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateCarTypeRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: Option<String>,

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

impl From<UpdateCarTypeRequest> for CarTypePatch {
    fn from(req: UpdateCarTypeRequest) -> Self {
        CarTypePatch {
            name: req.name,
            image: req.image,
            is_active: req.is_active,
            is_deleted: req.is_deleted,
        }
    }
}

/// Public projection of a car type.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarTypeResponse {
    #[serde(rename = "_id")]
    pub id: i64,
    pub name: String,
    pub image: Option<Media>,
    pub is_active: bool,
}

impl From<CarType> for CarTypeResponse {
    fn from(car_type: CarType) -> Self {
        CarTypeResponse {
            id: car_type.id,
            name: car_type.name,
            image: car_type.image,
            is_active: car_type.audit.is_active,
        }
    }
}

//! DTOs for `/rents`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::{DisplayFromStr, PickFirst, serde_as};
use validator::{Validate, ValidationError};

use super::validate_finite;

use crate::domain::entities::{NewRent, PaymentStatus, Rent, RentPatch, RentStatus};

fn validate_breakdown(value: &Value) -> Result<(), ValidationError> {
    if value.is_object() {
        Ok(())
    } else {
        Err(ValidationError::new("price_breakdown_not_object"))
    }
}

/// Request body for `POST /rents`.
///
/// `rentId` and `customer` are assigned by the server; `owner` must differ
/// from the acting user.
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateRentRequest {
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[validate(range(min = 1, message = "Invalid car type id"))]
    pub car_type: i64,

    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[validate(range(min = 1, message = "Invalid car id"))]
    pub car: i64,

    #[validate(length(min = 1, message = "Owner is required"))]
    pub owner: String,

    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub rent_from_date: Option<i64>,

    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub rent_to_date: Option<i64>,

    #[serde(default)]
    pub pickup: Option<String>,

    #[serde(default)]
    pub dropoff: Option<String>,

    #[serde(default)]
    pub destination: Option<String>,

    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    #[validate(range(min = 0.0), custom(function = "validate_finite"))]
    pub price: Option<f64>,

    #[serde(default)]
    #[validate(custom(function = "validate_breakdown"))]
    pub price_breakdown: Option<Value>,

    #[serde(default)]
    pub status: Option<RentStatus>,

    #[serde(default)]
    pub payment_status: Option<PaymentStatus>,

    #[serde(default)]
    pub notes_for_owner: Option<String>,
}

impl From<CreateRentRequest> for NewRent {
    fn from(req: CreateRentRequest) -> Self {
        NewRent {
            car_type: req.car_type,
            car: req.car,
            owner: req.owner,
            rent_from_date: req.rent_from_date,
            rent_to_date: req.rent_to_date,
            pickup: req.pickup,
            dropoff: req.dropoff,
            destination: req.destination,
            price: req.price,
            price_breakdown: req.price_breakdown,
            status: req.status,
            payment_status: req.payment_status,
            notes_for_owner: req.notes_for_owner,
        }
    }
}

/// Request body for `PATCH /rents/{id}`.
///
/// The car, its type and the parties are fixed once booked.
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateRentRequest {
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub rent_from_date: Option<i64>,

    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub rent_to_date: Option<i64>,

    #[serde(default)]
    pub pickup: Option<String>,

    #[serde(default)]
    pub dropoff: Option<String>,

    #[serde(default)]
    pub destination: Option<String>,

    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    #[validate(range(min = 0.0), custom(function = "validate_finite"))]
    pub price: Option<f64>,

    #[serde(default)]
    #[validate(custom(function = "validate_breakdown"))]
    pub price_breakdown: Option<Value>,

    #[serde(default)]
    pub status: Option<RentStatus>,

    #[serde(default)]
    pub payment_status: Option<PaymentStatus>,

    #[serde(default)]
    pub notes_for_owner: Option<String>,

    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub is_active: Option<bool>,

    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub is_deleted: Option<bool>,
}

impl From<UpdateRentRequest> for RentPatch {
    fn from(req: UpdateRentRequest) -> Self {
        RentPatch {
            rent_from_date: req.rent_from_date,
            rent_to_date: req.rent_to_date,
            pickup: req.pickup,
            dropoff: req.dropoff,
            destination: req.destination,
            price: req.price,
            price_breakdown: req.price_breakdown,
            status: req.status,
            payment_status: req.payment_status,
            notes_for_owner: req.notes_for_owner,
            is_active: req.is_active,
            is_deleted: req.is_deleted,
        }
    }
}

/// Public projection of a rent.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentResponse {
    #[serde(rename = "_id")]
    pub id: i64,
    pub rent_id: String,
    pub car_type: i64,
    pub car: i64,
    pub owner: String,
    pub customer: String,
    pub rent_from_date: Option<i64>,
    pub rent_to_date: Option<i64>,
    pub pickup: Option<String>,
    pub dropoff: Option<String>,
    pub destination: Option<String>,
    pub price: Option<f64>,
    pub price_breakdown: Option<Value>,
    pub status: RentStatus,
    pub payment_status: PaymentStatus,
    pub notes_for_owner: Option<String>,
    pub is_active: bool,
}

impl From<Rent> for RentResponse {
    fn from(rent: Rent) -> Self {
        RentResponse {
            id: rent.id,
            rent_id: rent.rent_id,
            car_type: rent.car_type,
            car: rent.car,
            owner: rent.owner,
            customer: rent.customer,
            rent_from_date: rent.rent_from_date,
            rent_to_date: rent.rent_to_date,
            pickup: rent.pickup,
            dropoff: rent.dropoff,
            destination: rent.destination,
            price: rent.price,
            price_breakdown: rent.price_breakdown,
            status: rent.status,
            payment_status: rent.payment_status,
            notes_for_owner: rent.notes_for_owner,
            is_active: rent.audit.is_active,
        }
    }
}

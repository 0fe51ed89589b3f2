//! DTOs for `/cars`.
//!
//! Numeric fields accept either JSON numbers or their string forms, so the
//! same DTOs deserialize JSON and multipart bodies.

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, PickFirst, serde_as};
use validator::Validate;

use super::validate_finite;

use crate::domain::entities::{Car, CarPatch, Currency, Media, NewCar};

/// Request body for `POST /cars`.
///
/// `carId`, `slug` and `owner` are assigned by the server.
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateCarRequest {
    #[serde(rename = "type")]
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[validate(range(min = 1, message = "Invalid type id"))]
    pub car_type: i64,

    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[validate(range(min = 1, message = "Invalid brand id"))]
    pub brand: i64,

    #[validate(length(min = 1, max = 30, message = "Name must be 1-30 characters"))]
    pub name: String,

    #[serde(default)]
    pub make: Option<String>,

    #[serde(default)]
    pub model: Option<String>,

    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub year: Option<i32>,

    #[serde(default)]
    pub color: Option<String>,

    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    #[validate(range(min = 0))]
    pub mileage: Option<i64>,

    #[serde(default)]
    pub transmission: Option<String>,

    #[serde(default)]
    pub fuel_type: Option<String>,

    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    #[validate(range(min = 1))]
    pub number_of_seats: Option<i32>,

    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    #[validate(range(min = 0.0), custom(function = "validate_finite"))]
    pub rent_per_day_price: Option<f64>,

    #[serde(default)]
    pub price_currency: Option<Currency>,

    #[serde(default)]
    pub features: Vec<String>,

    #[serde(default)]
    pub additional_rules: Option<String>,

    #[serde(default)]
    #[validate(nested)]
    pub thumbnail: Option<Media>,

    #[serde(default)]
    #[validate(nested)]
    pub images: Vec<Media>,

    #[serde(default)]
    #[validate(nested)]
    pub videos: Vec<Media>,
}

impl From<CreateCarRequest> for NewCar {
    fn from(req: CreateCarRequest) -> Self {
        NewCar {
            car_type: req.car_type,
            brand: req.brand,
            name: req.name,
            make: req.make,
            model: req.model,
            year: req.year,
            color: req.color,
            mileage: req.mileage,
            transmission: req.transmission,
            fuel_type: req.fuel_type,
            number_of_seats: req.number_of_seats,
            rent_per_day_price: req.rent_per_day_price,
            price_currency: req.price_currency,
            features: req.features,
            additional_rules: req.additional_rules,
            thumbnail: req.thumbnail,
            images: req.images,
            videos: req.videos,
        }
    }
}

/// Request body for `PATCH`/`PUT /cars/{id}`.
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateCarRequest {
    #[serde(rename = "type")]
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    #[validate(range(min = 1, message = "Invalid type id"))]
    pub car_type: Option<i64>,

    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    #[validate(range(min = 1, message = "Invalid brand id"))]
    pub brand: Option<i64>,

    #[serde(default)]
    #[validate(length(min = 1, max = 30, message = "Name must be 1-30 characters"))]
    pub name: Option<String>,

    #[serde(default)]
    pub make: Option<String>,

    #[serde(default)]
    pub model: Option<String>,

    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub year: Option<i32>,

    #[serde(default)]
    pub color: Option<String>,

    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    #[validate(range(min = 0))]
    pub mileage: Option<i64>,

    #[serde(default)]
    pub transmission: Option<String>,

    #[serde(default)]
    pub fuel_type: Option<String>,

    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    #[validate(range(min = 1))]
    pub number_of_seats: Option<i32>,

    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    #[validate(range(min = 0.0), custom(function = "validate_finite"))]
    pub rent_per_day_price: Option<f64>,

    #[serde(default)]
    pub price_currency: Option<Currency>,

    #[serde(default)]
    pub features: Option<Vec<String>>,

    #[serde(default)]
    pub additional_rules: Option<String>,

    #[serde(default)]
    #[validate(nested)]
    pub thumbnail: Option<Media>,

    #[serde(default)]
    #[validate(nested)]
    pub images: Option<Vec<Media>>,

    #[serde(default)]
    #[validate(nested)]
    pub videos: Option<Vec<Media>>,
}

impl From<UpdateCarRequest> for CarPatch {
    fn from(req: UpdateCarRequest) -> Self {
        CarPatch {
            car_type: req.car_type,
            brand: req.brand,
            name: req.name,
            make: req.make,
            model: req.model,
            year: req.year,
            color: req.color,
            mileage: req.mileage,
            transmission: req.transmission,
            fuel_type: req.fuel_type,
            number_of_seats: req.number_of_seats,
            rent_per_day_price: req.rent_per_day_price,
            price_currency: req.price_currency,
            features: req.features,
            additional_rules: req.additional_rules,
            thumbnail: req.thumbnail,
            images: req.images,
            videos: req.videos,
        }
    }
}

/// Public projection of a car.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarResponse {
    #[serde(rename = "_id")]
    pub id: i64,
    pub car_id: String,
    pub owner: String,
    #[serde(rename = "type")]
    pub car_type: i64,
    pub brand: i64,
    pub name: String,
    pub slug: String,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub color: Option<String>,
    pub mileage: Option<i64>,
    pub transmission: Option<String>,
    pub fuel_type: Option<String>,
    pub number_of_seats: Option<i32>,
    pub rent_per_day_price: Option<f64>,
    pub price_currency: Currency,
    pub features: Vec<String>,
    pub additional_rules: Option<String>,
    pub thumbnail: Option<Media>,
    pub images: Vec<Media>,
    pub videos: Vec<Media>,
    pub ratings: Option<f64>,
    pub is_active: bool,
}

impl From<Car> for CarResponse {
    fn from(car: Car) -> Self {
        CarResponse {
            id: car.id,
            car_id: car.car_id,
            owner: car.owner,
            car_type: car.car_type,
            brand: car.brand,
            name: car.name,
            slug: car.slug,
            make: car.make,
            model: car.model,
            year: car.year,
            color: car.color,
            mileage: car.mileage,
            transmission: car.transmission,
            fuel_type: car.fuel_type,
            number_of_seats: car.number_of_seats,
            rent_per_day_price: car.rent_per_day_price,
            price_currency: car.price_currency,
            features: car.features,
            additional_rules: car.additional_rules,
            thumbnail: car.thumbnail,
            images: car.images,
            videos: car.videos,
            ratings: car.ratings,
            is_active: car.audit.is_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_accepts_numeric_strings() {
        let req: CreateCarRequest = serde_json::from_value(json!({
            "type": "3",
            "brand": 4,
            "name": "Corolla",
            "year": "2019",
            "rentPerDayPrice": "45.5"
        }))
        .unwrap();

        assert_eq!(req.car_type, 3);
        assert_eq!(req.brand, 4);
        assert_eq!(req.year, Some(2019));
        assert_eq!(req.rent_per_day_price, Some(45.5));
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_create_rejects_long_name() {
        let req: CreateCarRequest = serde_json::from_value(json!({
            "type": 1,
            "brand": 1,
            "name": "x".repeat(31)
        }))
        .unwrap();

        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_rejects_unknown_currency() {
        let result = serde_json::from_value::<CreateCarRequest>(json!({
            "type": 1,
            "brand": 1,
            "name": "Civic",
            "priceCurrency": "GBP"
        }));

        assert!(result.is_err());
    }

    #[test]
    fn test_create_rejects_client_assigned_codes() {
        let result = serde_json::from_value::<CreateCarRequest>(json!({
            "type": 1,
            "brand": 1,
            "name": "Civic",
            "carId": "12345678"
        }));

        assert!(result.is_err());
    }

    #[test]
    fn test_update_has_no_soft_delete_flag() {
        let result = serde_json::from_value::<UpdateCarRequest>(json!({ "isDeleted": true }));
        assert!(result.is_err());
    }

    #[test]
    fn test_price_rejects_nan() {
        let req: CreateCarRequest = serde_json::from_value(json!({
            "type": 1,
            "brand": 1,
            "name": "Civic",
            "rentPerDayPrice": "NaN"
        }))
        .unwrap();

        assert!(req.validate().is_err());
    }

    #[test]
    fn test_price_rejects_infinity() {
        let req: UpdateCarRequest =
            serde_json::from_value(json!({ "rentPerDayPrice": "inf" })).unwrap();

        assert!(req.validate().is_err());
    }
}

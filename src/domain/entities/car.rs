//! Car listing entity.
//!
//! `car_id` and `slug` are minted by the server on creation and guarded by
//! unique constraints; the owner is always the user who created the listing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::entities::{Actor, Audit, Media};
use crate::domain::query::{FilterField, SortField};
use crate::domain::resource::Resource;
use crate::error::AppError;
use crate::utils::code_generator::{generate_numeric_id, generate_slug};

/// Raised when a stored enumeration value is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Tk,
    Usd,
    Eur,
}

impl Currency {
    pub fn as_str(self) -> &'static str {
        match self {
            Currency::Tk => "TK",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Currency {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TK" => Ok(Currency::Tk),
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            other => Err(UnknownVariant {
                kind: "currency",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Car {
    pub id: i64,
    pub car_id: String,
    pub owner: String,
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
    pub audit: Audit,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewCar {
    pub car_type: i64,
    pub brand: i64,
    pub name: String,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub color: Option<String>,
    pub mileage: Option<i64>,
    pub transmission: Option<String>,
    pub fuel_type: Option<String>,
    pub number_of_seats: Option<i32>,
    pub rent_per_day_price: Option<f64>,
    pub price_currency: Option<Currency>,
    pub features: Vec<String>,
    pub additional_rules: Option<String>,
    pub thumbnail: Option<Media>,
    pub images: Vec<Media>,
    pub videos: Vec<Media>,
}

/// A [`NewCar`] with its minted identifiers and owner.
#[derive(Debug, Clone, PartialEq)]
pub struct CarInsert {
    pub car_id: String,
    pub slug: String,
    pub owner: String,
    pub car: NewCar,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CarPatch {
    pub car_type: Option<i64>,
    pub brand: Option<i64>,
    pub name: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub color: Option<String>,
    pub mileage: Option<i64>,
    pub transmission: Option<String>,
    pub fuel_type: Option<String>,
    pub number_of_seats: Option<i32>,
    pub rent_per_day_price: Option<f64>,
    pub price_currency: Option<Currency>,
    pub features: Option<Vec<String>>,
    pub additional_rules: Option<String>,
    pub thumbnail: Option<Media>,
    pub images: Option<Vec<Media>>,
    pub videos: Option<Vec<Media>>,
}

/// Resource marker for `/cars`.
pub struct Cars;

impl Resource for Cars {
    type Entity = Car;
    type Draft = NewCar;
    type Insert = CarInsert;
    type Patch = CarPatch;

    const NAME: &'static str = "car";
    const FILE_FIELDS: &'static [&'static str] = &["image", "thumbnail"];
    const FILTERS: &'static [FilterField] = &[
        FilterField::text("name", "name"),
        FilterField::text("make", "make"),
        FilterField::text("model", "model"),
        FilterField::text("color", "color"),
        FilterField::keyword("carId", "car_id"),
        FilterField::keyword("slug", "slug"),
        FilterField::keyword("owner", "owner"),
        FilterField::keyword("transmission", "transmission"),
        FilterField::keyword("fuelType", "fuel_type"),
        FilterField::keyword("priceCurrency", "price_currency"),
        FilterField::integer("type", "car_type"),
        FilterField::integer("brand", "brand"),
        FilterField::integer("year", "year"),
        FilterField::integer("numberOfSeats", "number_of_seats"),
        FilterField::boolean("isActive", "is_active"),
    ];
    const SORTS: &'static [SortField] = &[
        SortField::new("_id", "id"),
        SortField::new("name", "name"),
        SortField::new("year", "year"),
        SortField::new("mileage", "mileage"),
        SortField::new("rentPerDayPrice", "rent_per_day_price"),
        SortField::new("ratings", "ratings"),
        SortField::new("cTime", "c_time"),
        SortField::new("uTime", "u_time"),
    ];
    const MINTED_CONSTRAINTS: &'static [&'static str] = &["cars_car_id_key", "cars_slug_key"];

    fn id(entity: &Car) -> i64 {
        entity.id
    }

    fn admit(draft: &NewCar, actor: &Actor) -> Result<CarInsert, AppError> {
        Ok(CarInsert {
            car_id: generate_numeric_id(),
            slug: generate_slug(),
            owner: actor.id.clone(),
            car: draft.clone(),
        })
    }
}

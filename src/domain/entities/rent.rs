//! Rental transaction entity.
//!
//! The customer is always the user who books; booking one's own car is
//! rejected before anything is written. Date ranges and status transitions
//! are stored as given.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::domain::entities::{Actor, Audit, UnknownVariant};
use crate::domain::query::{FilterField, SortField};
use crate::domain::resource::Resource;
use crate::error::AppError;
use crate::utils::code_generator::generate_numeric_id;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RentStatus {
    #[default]
    Pending,
    Confirmed,
    Ongoing,
    Completed,
    Cancelled,
}

impl RentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RentStatus::Pending => "pending",
            RentStatus::Confirmed => "confirmed",
            RentStatus::Ongoing => "ongoing",
            RentStatus::Completed => "completed",
            RentStatus::Cancelled => "cancelled",
        }
    }
}

impl FromStr for RentStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(RentStatus::Pending),
            "confirmed" => Ok(RentStatus::Confirmed),
            "ongoing" => Ok(RentStatus::Ongoing),
            "completed" => Ok(RentStatus::Completed),
            "cancelled" => Ok(RentStatus::Cancelled),
            other => Err(UnknownVariant {
                kind: "rent status",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for RentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Refunded,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Refunded => "refunded",
            PaymentStatus::Failed => "failed",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(PaymentStatus::Pending),
            "paid" => Ok(PaymentStatus::Paid),
            "refunded" => Ok(PaymentStatus::Refunded),
            "failed" => Ok(PaymentStatus::Failed),
            other => Err(UnknownVariant {
                kind: "payment status",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rent {
    pub id: i64,
    pub rent_id: String,
    pub car_type: i64,
    pub car: i64,
    pub owner: String,
    pub customer: String,
    /// Epoch milliseconds.
    pub rent_from_date: Option<i64>,
    /// Epoch milliseconds.
    pub rent_to_date: Option<i64>,
    pub pickup: Option<String>,
    pub dropoff: Option<String>,
    pub destination: Option<String>,
    pub price: Option<f64>,
    pub price_breakdown: Option<Value>,
    pub status: RentStatus,
    pub payment_status: PaymentStatus,
    pub notes_for_owner: Option<String>,
    pub audit: Audit,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewRent {
    pub car_type: i64,
    pub car: i64,
    pub owner: String,
    pub rent_from_date: Option<i64>,
    pub rent_to_date: Option<i64>,
    pub pickup: Option<String>,
    pub dropoff: Option<String>,
    pub destination: Option<String>,
    pub price: Option<f64>,
    pub price_breakdown: Option<Value>,
    pub status: Option<RentStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub notes_for_owner: Option<String>,
}

/// A [`NewRent`] with its minted id and the booking customer.
#[derive(Debug, Clone, PartialEq)]
pub struct RentInsert {
    pub rent_id: String,
    pub customer: String,
    pub rent: NewRent,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RentPatch {
    pub rent_from_date: Option<i64>,
    pub rent_to_date: Option<i64>,
    pub pickup: Option<String>,
    pub dropoff: Option<String>,
    pub destination: Option<String>,
    pub price: Option<f64>,
    pub price_breakdown: Option<Value>,
    pub status: Option<RentStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub notes_for_owner: Option<String>,
    pub is_active: Option<bool>,
    pub is_deleted: Option<bool>,
}

/// Resource marker for `/rents`.
pub struct Rents;

impl Resource for Rents {
    type Entity = Rent;
    type Draft = NewRent;
    type Insert = RentInsert;
    type Patch = RentPatch;

    const NAME: &'static str = "rent";
    const FILE_FIELDS: &'static [&'static str] = &[];
    const FILTERS: &'static [FilterField] = &[
        FilterField::text("pickup", "pickup"),
        FilterField::text("dropoff", "dropoff"),
        FilterField::text("destination", "destination"),
        FilterField::keyword("rentId", "rent_id"),
        FilterField::keyword("owner", "owner"),
        FilterField::keyword("customer", "customer"),
        FilterField::keyword("status", "status"),
        FilterField::keyword("paymentStatus", "payment_status"),
        FilterField::integer("car", "car"),
        FilterField::integer("carType", "car_type"),
        FilterField::boolean("isActive", "is_active"),
    ];
    const SORTS: &'static [SortField] = &[
        SortField::new("_id", "id"),
        SortField::new("rentFromDate", "rent_from_date"),
        SortField::new("rentToDate", "rent_to_date"),
        SortField::new("price", "price"),
        SortField::new("status", "status"),
        SortField::new("cTime", "c_time"),
        SortField::new("uTime", "u_time"),
    ];
    const MINTED_CONSTRAINTS: &'static [&'static str] = &["rents_rent_id_key"];

    fn id(entity: &Rent) -> i64 {
        entity.id
    }

    fn admit(draft: &NewRent, actor: &Actor) -> Result<RentInsert, AppError> {
        if draft.owner == actor.id {
            return Err(AppError::bad_request(
                "Car owner can't rent his own car",
                json!({ "owner": draft.owner }),
            ));
        }

        Ok(RentInsert {
            rent_id: generate_numeric_id(),
            customer: actor.id.clone(),
            rent: draft.clone(),
        })
    }
}

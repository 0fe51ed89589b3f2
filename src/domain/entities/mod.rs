//! Core domain entities representing the rental data model.
//!
//! Every entity carries an [`Audit`] block (soft-delete flags plus who/when
//! stamps) and comes with separate input structs:
//! - `New*` - validated creation input
//! - `*Insert` - creation input completed with minted values (cars, rents)
//! - `*Patch` - partial update, `None` leaves a field unchanged
//!
//! Each entity module also declares its resource marker ([`Brands`],
//! [`CarTypes`], [`Cars`], [`Rents`]) implementing
//! [`crate::domain::resource::Resource`].

pub mod audit;
pub mod brand;
pub mod car;
pub mod car_type;
pub mod media;
pub mod rent;

pub use audit::{Actor, Audit, Stamp};
pub use brand::{Brand, BrandPatch, Brands, NewBrand};
pub use car::{Car, CarInsert, CarPatch, Cars, Currency, NewCar, UnknownVariant};
pub use car_type::{CarType, CarTypePatch, CarTypes, NewCarType};
pub use media::Media;
pub use rent::{NewRent, PaymentStatus, Rent, RentInsert, RentPatch, RentStatus, Rents};

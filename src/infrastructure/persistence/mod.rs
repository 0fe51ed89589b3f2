//! PostgreSQL repository implementations.
//!
//! Concrete implementations of [`crate::domain::repositories::ResourceRepository`]
//! using SQLx runtime queries. Listing and counting share the
//! [`SearchQuery`](crate::domain::query::SearchQuery) rendering in [`sql`].
//!
//! # Repositories
//!
//! - [`PgBrandRepository`] - `brands`
//! - [`PgCarTypeRepository`] - `car_types`
//! - [`PgCarRepository`] - `cars`
//! - [`PgRentRepository`] - `rents`

pub mod pg_brand_repository;
pub mod pg_car_repository;
pub mod pg_car_type_repository;
pub mod pg_rent_repository;
pub(crate) mod sql;

pub use pg_brand_repository::PgBrandRepository;
pub use pg_car_repository::PgCarRepository;
pub use pg_car_type_repository::PgCarTypeRepository;
pub use pg_rent_repository::PgRentRepository;

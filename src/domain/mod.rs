//! Domain layer containing business entities and logic.
//!
//! # Architecture
//!
//! - [`entities`] - Rental data model and per-entity resource markers
//! - [`resource`] - The [`resource::Resource`] description the generic layers build on
//! - [`query`] - Search query construction (filters, sort, pagination)
//! - [`repositories`] - Data access trait definitions
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Repository traits define contracts implemented by infrastructure layer
//! - Business logic is encapsulated in services (see [`crate::application::services`])

pub mod entities;
pub mod query;
pub mod repositories;
pub mod resource;

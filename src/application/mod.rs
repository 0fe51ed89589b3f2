//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and business rules. Services consume repository traits and provide
//! a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::resource_service::ResourceService`] - Create, read, update and
//!   search for one resource collection
//! - [`services::auth_service::AuthService`] - Bearer JWT authentication

pub mod services;

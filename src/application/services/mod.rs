//! Business logic services for the application layer.

pub mod auth_service;
pub mod resource_service;

pub use auth_service::AuthService;
pub use resource_service::ResourceService;

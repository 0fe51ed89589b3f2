//! HTTP request handlers for API endpoints.
//!
//! Resource handlers are generic over [`crate::api::resources::ApiResource`]
//! and mounted once per collection.

pub mod health;
pub mod resource;

pub use health::health_handler;
pub use resource::{
    count_handler, create_handler, find_one_handler, list_handler, method_not_allowed,
    update_handler,
};

//! Data Transfer Objects for API requests and responses.
//!
//! Request DTOs use Serde for deserialization and validator for input
//! validation; they reject unknown fields. Response DTOs are the public
//! projection of each entity: `_id`, the entity fields and `isActive`.

pub mod brand;
pub mod car;
pub mod car_type;
pub mod health;
pub mod rent;

use validator::ValidationError;

/// Rejects `NaN` and infinities, which the string forms of float fields
/// (`"NaN"`, `"inf"`) would otherwise let through.
pub(crate) fn validate_finite(value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::new("not_finite").with_message("Must be a finite number".into()))
    }
}

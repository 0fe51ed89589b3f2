//! Authentication service for bearer JWT validation.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::entities::Actor;
use crate::error::AppError;

/// Claims carried by an access token. `sub` is the user id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Service for authenticating API requests via Bearer tokens.
///
/// Tokens are HS256-signed JWTs keyed by the server secret. Verification is
/// stateless: a token is valid while its signature checks out and `exp` lies
/// in the future.
pub struct AuthService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl AuthService {
    /// Creates a new authentication service keyed by `secret`.
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Signs a token for `user_id` valid for `ttl`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the token cannot be encoded.
    pub fn issue(&self, user_id: &str, ttl: Duration) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            AppError::internal("Failed to sign token", json!({ "reason": e.to_string() }))
        })
    }

    /// Verifies a raw token and resolves the acting user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if:
    /// - The signature does not match the server secret
    /// - The token has expired
    /// - The subject is empty or blank
    pub fn authenticate(&self, token: &str) -> Result<Actor, AppError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            AppError::unauthorized("Unauthorized", json!({ "reason": e.to_string() }))
        })?;

        // Compared against trimmed body fields such as a rent's owner.
        let user_id = data.claims.sub.trim();
        if user_id.is_empty() {
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "Token has no subject" }),
            ));
        }

        Ok(Actor::new(user_id))
    }
}

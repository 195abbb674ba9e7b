use std::fmt;

use crate::error::AppError;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Signing settings for session tokens, loaded once at startup.
#[derive(Clone)]
pub struct JwtConfig {
    secret: String,
    expire_minutes: i64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, expire_minutes: i64) -> Self {
        Self {
            secret: secret.into(),
            expire_minutes,
        }
    }

    pub fn expire_minutes(&self) -> i64 {
        self.expire_minutes
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("expire_minutes", &self.expire_minutes)
            .finish()
    }
}

/// Represents the claims encoded within a JWT (JSON Web Token).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Username of the authenticated user.
    pub sub: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: usize,
    /// Expiration timestamp (seconds since epoch).
    pub exp: usize,
}

/// Issues an HS256 token asserting `username`, valid for the configured number of minutes.
///
/// # Returns
/// Returns `AppError::InternalServerError` if encoding fails.
pub fn generate_token(config: &JwtConfig, username: &str) -> Result<String, AppError> {
    let now = chrono::Utc::now();
    let expiration = chrono::Duration::try_minutes(config.expire_minutes)
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .ok_or_else(|| AppError::InternalServerError("Token expiry out of range".into()))?;

    let claims = Claims {
        sub: username.to_string(),
        iat: now.timestamp() as usize,
        exp: expiration.timestamp() as usize,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
}

/// Verifies signature and expiry of `token` and returns its claims.
///
/// # Returns
/// Returns `AppError::Unauthorized` if the token is malformed, its signature is invalid,
/// it has expired, or its subject is empty.
pub fn verify_token(config: &JwtConfig, token: &str) -> Result<Claims, AppError> {
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
    .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))?;

    if claims.sub.is_empty() {
        return Err(AppError::Unauthorized("Invalid token: missing subject".into()));
    }
    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str) -> JwtConfig {
        JwtConfig::new(secret, 30)
    }

    #[test]
    fn test_token_generation_and_verification() {
        let config = config("test_secret_for_gen_verify");
        let token = generate_token(&config, "ana").unwrap();
        let claims = verify_token(&config, &token).unwrap();
        assert_eq!(claims.sub, "ana");
        assert!(claims.exp > claims.iat);
        assert_eq!(claims.exp - claims.iat, 30 * 60);
    }

    #[test]
    fn test_token_expiration() {
        let config = config("test_secret_for_expiration");
        let expiration = chrono::Utc::now()
            .checked_sub_signed(chrono::Duration::hours(2))
            .expect("valid timestamp")
            .timestamp() as usize;

        let claims_expired = Claims {
            sub: "ana".into(),
            iat: expiration - 60,
            exp: expiration,
        };
        let expired_token = encode(
            &Header::default(),
            &claims_expired,
            &EncodingKey::from_secret("test_secret_for_expiration".as_bytes()),
        )
        .unwrap();

        match verify_token(&config, &expired_token) {
            Err(AppError::Unauthorized(msg)) => {
                assert!(msg.contains("Invalid token: ExpiredSignature"));
            }
            Ok(_) => panic!("Token should have been invalid due to expiration"),
            Err(e) => panic!("Unexpected error type for expired token: {:?}", e),
        }
    }

    #[test]
    fn test_invalid_token_signature() {
        let token = generate_token(&config("one_secret"), "ana").unwrap();

        match verify_token(&config("a_completely_different_secret"), &token) {
            Err(AppError::Unauthorized(msg)) => {
                assert!(msg.contains("Invalid token: InvalidSignature"));
            }
            Ok(_) => panic!("Token should have been invalid due to signature mismatch"),
            Err(e) => panic!("Unexpected error type for invalid signature: {:?}", e),
        }
    }

    #[test]
    fn test_malformed_token() {
        let result = verify_token(&config("secret"), "not-a-jwt");
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn test_expiry_out_of_range_is_an_error() {
        let config = JwtConfig::new("secret", i64::MAX);
        let result = generate_token(&config, "alice");
        assert!(matches!(result, Err(AppError::InternalServerError(_))));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let rendered = format!("{:?}", config("super-secret-value"));
        assert!(!rendered.contains("super-secret-value"));
    }
}

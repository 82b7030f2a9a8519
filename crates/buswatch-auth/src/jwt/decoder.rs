//! JWT token validation and decoding.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use buswatch_core::config::auth::AuthConfig;
use buswatch_core::error::AppError;

use super::claims::Claims;

/// Validates and decodes JWT access tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation rules (HS256, exp checked).
    validation: Validation,
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Decodes and validates an access token, returning its claims.
    pub fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::authentication(format!("Invalid access token: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::encoder::JwtEncoder;
    use buswatch_entity::user::{User, UserRole};
    use chrono::Utc;
    use uuid::Uuid;

    fn auth_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret".to_string(),
            jwt_ttl_minutes: 60,
        }
    }

    fn user() -> User {
        User {
            id: Uuid::new_v4(),
            username: "operator1".to_string(),
            password_hash: "hash".to_string(),
            role: UserRole::Operator,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_round_trip() {
        let config = auth_config();
        let user = user();

        let token = JwtEncoder::new(&config).generate_token(&user).unwrap();
        let claims = JwtDecoder::new(&config).decode_token(&token).unwrap();

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.username, "operator1");
        assert_eq!(claims.role, UserRole::Operator);
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = JwtEncoder::new(&auth_config())
            .generate_token(&user())
            .unwrap();

        let other = AuthConfig {
            jwt_secret: "different-secret".to_string(),
            jwt_ttl_minutes: 60,
        };
        assert!(JwtDecoder::new(&other).decode_token(&token).is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert!(
            JwtDecoder::new(&auth_config())
                .decode_token("not.a.token")
                .is_err()
        );
    }
}

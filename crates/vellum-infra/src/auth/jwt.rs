//! JWT token service implementation.

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use vellum_core::ports::{AuthError, IssuedToken, TokenClaims, TokenService};

const DEFAULT_SECRET: &str = "change-me-in-production";

/// JWT token service configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub algorithm: Algorithm,
    pub expire_minutes: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: DEFAULT_SECRET.to_string(),
            algorithm: Algorithm::HS256,
            expire_minutes: 30,
        }
    }
}

/// Wire-level claims. The subject is the user id rendered as a string, per
/// the JWT convention that `sub` is textual.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: i64,
    iat: i64,
}

/// JWT-based token service using a shared HMAC secret.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: JwtConfig,
}

impl JwtTokenService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            encoding_key,
            decoding_key,
            config,
        }
    }

    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_SECRET.to_string());

        if secret == DEFAULT_SECRET {
            let is_production = std::env::var("APP_ENV")
                .map(|v| v == "production" || v == "prod")
                .unwrap_or(false);

            if is_production {
                tracing::error!(
                    "SECURITY: Using default JWT secret in production! Set JWT_SECRET environment variable."
                );
            } else {
                tracing::warn!("Using default JWT secret. Set JWT_SECRET for production use.");
            }
        }

        let algorithm = match std::env::var("JWT_ALGORITHM") {
            Ok(raw) => match raw.parse::<Algorithm>() {
                // Only HMAC variants work with a shared secret.
                Ok(alg @ (Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512)) => alg,
                _ => {
                    tracing::warn!(value = %raw, "unsupported JWT_ALGORITHM, falling back to HS256");
                    Algorithm::HS256
                }
            },
            Err(_) => Algorithm::HS256,
        };

        let config = JwtConfig {
            secret,
            algorithm,
            expire_minutes: std::env::var("TOKEN_EXPIRE_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        };
        Self::new(config)
    }
}

impl TokenService for JwtTokenService {
    fn issue_token(&self, user_id: i32) -> Result<IssuedToken, AuthError> {
        let now = Utc::now();
        let expires_at = now + TimeDelta::minutes(self.config.expire_minutes);

        let claims = Claims {
            sub: user_id.to_string(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(&Header::new(self.config.algorithm), &claims, &self.encoding_key)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        Ok(IssuedToken { token, expires_at })
    }

    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let validation = Validation::new(self.config.algorithm);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            }
        })?;

        let user_id = token_data
            .claims
            .sub
            .parse::<i32>()
            .map_err(|_| AuthError::InvalidToken("subject is not a user id".to_string()))?;

        Ok(TokenClaims {
            user_id,
            exp: token_data.claims.exp,
        })
    }

    fn lifetime_seconds(&self) -> i64 {
        self.config.expire_minutes * 60
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key".to_string(),
            algorithm: Algorithm::HS256,
            expire_minutes: 30,
        }
    }

    #[test]
    fn test_issue_and_validate_roundtrip() {
        let service = JwtTokenService::new(test_config());

        let issued = service.issue_token(42).unwrap();
        assert!(!issued.token.is_empty());
        assert!(issued.expires_at > Utc::now());

        let claims = service.validate_token(&issued.token).unwrap();
        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.exp, issued.expires_at.timestamp());
    }

    #[test]
    fn test_validate_garbage_token() {
        let service = JwtTokenService::new(test_config());

        let result = service.validate_token("not-a-token");

        assert!(matches!(result.unwrap_err(), AuthError::InvalidToken(_)));
    }

    #[test]
    fn test_validate_token_signed_with_other_secret() {
        let service = JwtTokenService::new(test_config());
        let other = JwtTokenService::new(JwtConfig {
            secret: "other-secret".to_string(),
            ..test_config()
        });

        let issued = other.issue_token(7).unwrap();

        let result = service.validate_token(&issued.token);
        assert!(matches!(result.unwrap_err(), AuthError::InvalidToken(_)));
    }

    #[test]
    fn test_validate_token_with_wrong_algorithm() {
        let hs256 = JwtTokenService::new(test_config());
        let hs384 = JwtTokenService::new(JwtConfig {
            algorithm: Algorithm::HS384,
            ..test_config()
        });

        let issued = hs256.issue_token(7).unwrap();

        assert!(hs384.validate_token(&issued.token).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        // A negative lifetime puts `exp` far enough in the past to clear the
        // decoder's 60 second leeway.
        let service = JwtTokenService::new(JwtConfig {
            expire_minutes: -5,
            ..test_config()
        });

        let issued = service.issue_token(42).unwrap();

        let result = service.validate_token(&issued.token);
        assert!(matches!(result.unwrap_err(), AuthError::TokenExpired));
    }

    #[test]
    fn test_non_numeric_subject_is_rejected() {
        let config = test_config();
        let claims = Claims {
            sub: "alice".to_string(),
            exp: (Utc::now() + TimeDelta::minutes(5)).timestamp(),
            iat: Utc::now().timestamp(),
        };
        let token = encode(
            &Header::new(config.algorithm),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        let service = JwtTokenService::new(config);
        let result = service.validate_token(&token);
        assert!(matches!(result.unwrap_err(), AuthError::InvalidToken(_)));
    }

    #[test]
    fn test_lifetime_seconds() {
        let service = JwtTokenService::new(test_config());

        assert_eq!(service.lifetime_seconds(), 1800);
    }
}

//! Bearer-token verification.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use crate::{JwtClaims, TokenValidationError, validate_claims};

/// Verifies a raw token and returns its claims.
pub trait JwtValidator: Send + Sync {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, TokenValidationError>;
}

/// HS256 shared-secret validator.
///
/// Expiry is checked by [`validate_claims`] against the caller-supplied
/// clock instead of by `jsonwebtoken`, so tests can pin time.
pub struct Hs256JwtValidator {
    key: DecodingKey,
    validation: Validation,
}

impl Hs256JwtValidator {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        Self {
            key: DecodingKey::from_secret(secret.as_ref()),
            validation,
        }
    }

    /// Require the token's `aud` claim to be present and contain `audience`.
    pub fn with_audience(mut self, audience: &str) -> Self {
        self.validation.set_audience(&[audience]);
        self.validation.validate_aud = true;
        self.validation.required_spec_claims.insert("aud".to_string());
        self
    }
}

impl JwtValidator for Hs256JwtValidator {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, TokenValidationError> {
        let data = decode::<JwtClaims>(token, &self.key, &self.validation).map_err(|e| {
            tracing::debug!(error = %e, "jwt decode failed");
            TokenValidationError::Malformed(e.to_string())
        })?;

        validate_claims(&data.claims, now)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Permission;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use serde_json::json;

    const SECRET: &str = "test-secret";

    fn mint(claims: &serde_json::Value, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    #[test]
    fn valid_token_round_trips_claims() {
        let t = now().timestamp();
        let token = mint(
            &json!({"sub": "barista", "permissions": ["get:drinks-detail"], "iat": t - 5, "exp": t + 600}),
            SECRET,
        );

        let claims = Hs256JwtValidator::new(SECRET).validate(&token, now()).unwrap();
        assert_eq!(claims.sub, "barista");
        assert_eq!(
            claims.permissions,
            Some(vec![Permission::new("get:drinks-detail")])
        );
    }

    #[test]
    fn wrong_secret_is_malformed() {
        let t = now().timestamp();
        let token = mint(&json!({"sub": "x", "iat": t - 5, "exp": t + 600}), "other");

        let err = Hs256JwtValidator::new(SECRET).validate(&token, now()).unwrap_err();
        assert!(matches!(err, TokenValidationError::Malformed(_)));
    }

    #[test]
    fn expired_token_is_rejected() {
        let t = now().timestamp();
        let token = mint(&json!({"sub": "x", "iat": t - 600, "exp": t - 5}), SECRET);

        let err = Hs256JwtValidator::new(SECRET).validate(&token, now()).unwrap_err();
        assert_eq!(err, TokenValidationError::Expired);
    }

    #[test]
    fn audience_is_enforced_when_configured() {
        let t = now().timestamp();
        let validator = Hs256JwtValidator::new(SECRET).with_audience("coffee");

        let good = mint(&json!({"sub": "x", "aud": "coffee", "iat": t - 5, "exp": t + 60}), SECRET);
        assert!(validator.validate(&good, now()).is_ok());

        let bad = mint(&json!({"sub": "x", "aud": "trivia", "iat": t - 5, "exp": t + 60}), SECRET);
        assert!(validator.validate(&bad, now()).is_err());

        let missing = mint(&json!({"sub": "x", "permissions": ["*"], "iat": t - 5, "exp": t + 60}), SECRET);
        let err = validator.validate(&missing, now()).unwrap_err();
        assert!(matches!(err, TokenValidationError::Malformed(_)));
    }

    #[test]
    fn garbage_is_malformed() {
        let err = Hs256JwtValidator::new(SECRET).validate("not-a-jwt", now()).unwrap_err();
        assert!(matches!(err, TokenValidationError::Malformed(_)));
    }
}

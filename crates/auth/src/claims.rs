use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Permission;

/// JWT claims model (transport-agnostic).
///
/// Timestamps are JWT `NumericDate`s (seconds since the Unix epoch).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject / caller identifier.
    pub sub: String,

    /// Granted permissions. Absent means the issuer was not configured to
    /// emit them, which is a different failure from "not granted".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<Permission>>,

    /// Issued-at timestamp.
    pub iat: i64,

    /// Expiration timestamp.
    pub exp: i64,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("token is malformed or its signature is invalid: {0}")]
    Malformed(String),

    #[error("token has expired")]
    Expired,

    #[error("token not yet valid (issued in the future)")]
    NotYetValid,

    #[error("invalid token time window (exp <= iat)")]
    InvalidTimeWindow,
}

/// Deterministically validate the claim time window against `now`.
///
/// Signature verification happens before this, in the validator.
pub fn validate_claims(claims: &JwtClaims, now: DateTime<Utc>) -> Result<(), TokenValidationError> {
    let now = now.timestamp();
    if claims.exp <= claims.iat {
        return Err(TokenValidationError::InvalidTimeWindow);
    }
    if now < claims.iat {
        return Err(TokenValidationError::NotYetValid);
    }
    if now >= claims.exp {
        return Err(TokenValidationError::Expired);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn claims(iat: i64, exp: i64) -> JwtClaims {
        JwtClaims {
            sub: "auth0|barista".into(),
            permissions: Some(vec![Permission::new("get:drinks-detail")]),
            iat,
            exp,
        }
    }

    #[test]
    fn accepts_token_inside_window() {
        assert_eq!(validate_claims(&claims(100, 200), at(150)), Ok(()));
    }

    #[test]
    fn rejects_expired_token() {
        assert_eq!(
            validate_claims(&claims(100, 200), at(200)),
            Err(TokenValidationError::Expired)
        );
    }

    #[test]
    fn rejects_token_from_the_future() {
        let now = at(1_000);
        let iat = (now + Duration::seconds(30)).timestamp();
        assert_eq!(
            validate_claims(&claims(iat, iat + 60), now),
            Err(TokenValidationError::NotYetValid)
        );
    }

    #[test]
    fn rejects_inverted_window() {
        assert_eq!(
            validate_claims(&claims(200, 200), at(150)),
            Err(TokenValidationError::InvalidTimeWindow)
        );
    }

    #[test]
    fn permissions_claim_is_optional_on_the_wire() {
        let parsed: JwtClaims =
            serde_json::from_str(r#"{"sub":"x","iat":1,"exp":2}"#).unwrap();
        assert_eq!(parsed.permissions, None);
    }
}

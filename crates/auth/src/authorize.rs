use thiserror::Error;

use crate::{Permission, Principal};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("permissions not included in token")]
    PermissionsClaimMissing,

    #[error("missing permission '{0}'")]
    Forbidden(String),
}

/// Check that `principal` carries `required` (or the wildcard).
///
/// - No IO
/// - No panics
pub fn authorize(principal: &Principal, required: &Permission) -> Result<(), AuthzError> {
    let granted = principal
        .permissions
        .iter()
        .any(|p| p.is_wildcard() || p == required);

    if granted {
        Ok(())
    } else {
        Err(AuthzError::Forbidden(required.as_str().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::JwtClaims;

    fn principal(perms: &[&'static str]) -> Principal {
        Principal {
            subject: "auth0|manager".into(),
            permissions: perms.iter().map(|p| Permission::from_static(*p)).collect(),
        }
    }

    #[test]
    fn exact_permission_is_granted() {
        let p = principal(&["get:drinks-detail", "post:drinks"]);
        assert!(authorize(&p, &Permission::from_static("post:drinks")).is_ok());
    }

    #[test]
    fn missing_permission_is_forbidden() {
        let p = principal(&["get:drinks-detail"]);
        assert_eq!(
            authorize(&p, &Permission::from_static("delete:drinks")),
            Err(AuthzError::Forbidden("delete:drinks".into()))
        );
    }

    #[test]
    fn wildcard_grants_everything() {
        let p = principal(&["*"]);
        assert!(authorize(&p, &Permission::from_static("delete:questions")).is_ok());
    }

    #[test]
    fn claims_without_permissions_do_not_become_a_principal() {
        let claims = JwtClaims {
            sub: "x".into(),
            permissions: None,
            iat: 1,
            exp: 2,
        };
        assert_eq!(
            Principal::from_claims(claims),
            Err(AuthzError::PermissionsClaimMissing)
        );
    }
}

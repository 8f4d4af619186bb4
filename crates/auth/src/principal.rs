use crate::{AuthzError, JwtClaims, Permission};

/// A verified caller and what it may do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub subject: String,
    pub permissions: Vec<Permission>,
}

impl Principal {
    /// Build a principal from verified claims.
    ///
    /// Tokens without a `permissions` claim are rejected here rather than
    /// treated as "no permissions".
    pub fn from_claims(claims: JwtClaims) -> Result<Self, AuthzError> {
        let permissions = claims
            .permissions
            .ok_or(AuthzError::PermissionsClaimMissing)?;
        Ok(Self {
            subject: claims.sub,
            permissions,
        })
    }
}

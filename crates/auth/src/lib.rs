//! `crudkit-auth` — token verification and permission checks.
//!
//! This crate is intentionally decoupled from HTTP and storage: the API layer
//! extracts the bearer token and asks this crate what it is allowed to do.

pub mod authorize;
pub mod claims;
pub mod permissions;
pub mod principal;
pub mod validator;

pub use authorize::{AuthzError, authorize};
pub use claims::{JwtClaims, TokenValidationError, validate_claims};
pub use permissions::Permission;
pub use principal::Principal;
pub use validator::{Hs256JwtValidator, JwtValidator};

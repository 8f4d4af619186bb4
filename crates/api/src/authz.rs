//! Route-level permission guard.
//!
//! Handlers never look at tokens: a route that needs a permission is wrapped
//! with [`guarded`], which runs [`require_permission`] before the handler.

use std::sync::Arc;

use axum::routing::MethodRouter;

use crudkit_auth::{JwtValidator, Permission};

use crate::middleware::{Guard, require_permission};

/// Wrap `route` so it only runs for callers holding `permission`.
pub fn guarded<S>(route: MethodRouter<S>, jwt: &Arc<dyn JwtValidator>, permission: &'static str) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    let guard = Guard {
        jwt: Arc::clone(jwt),
        permission: Permission::from_static(permission),
    };
    route.route_layer(axum::middleware::from_fn_with_state(guard, require_permission))
}

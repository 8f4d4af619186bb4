use std::sync::Arc;

use axum::{
    body,
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use crudkit_auth::{JwtValidator, Permission, Principal, authorize};

use crate::app::errors::{ApiError, envelope};

/// State for one guarded route: who validates tokens and what the route needs.
#[derive(Clone)]
pub struct Guard {
    pub jwt: Arc<dyn JwtValidator>,
    pub permission: Permission,
}

/// Reject the request unless its bearer token grants `guard.permission`.
///
/// On success the verified [`Principal`] is attached to the request extensions.
pub async fn require_permission(
    State(guard): State<Guard>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer(req.headers())?;

    let claims = guard.jwt.validate(token, Utc::now()).map_err(|e| {
        tracing::debug!(error = %e, "rejected bearer token");
        ApiError::Unauthorized(e.to_string())
    })?;

    let principal = Principal::from_claims(claims)?;
    if let Err(e) = authorize(&principal, &guard.permission) {
        tracing::warn!(subject = %principal.subject, permission = %guard.permission, "permission denied");
        return Err(e.into());
    }

    tracing::debug!(subject = %principal.subject, permission = %guard.permission, "authorized");
    req.extensions_mut().insert(principal);
    Ok(next.run(req).await)
}

pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, ApiError> {
    let header = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("authorization header is expected".into()))?;

    let header = header
        .to_str()
        .map_err(|_| ApiError::Unauthorized("authorization header is not valid text".into()))?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::Unauthorized("authorization header must start with 'Bearer'".into()))?
        .trim();

    if token.is_empty() {
        return Err(ApiError::Unauthorized("bearer token is empty".into()));
    }

    Ok(token)
}

const MAX_ERROR_BODY: usize = 16 * 1024;

/// Rewrite framework-generated error responses (unknown route, wrong method,
/// path rejections) into the JSON envelope. JSON responses pass through.
pub async fn json_envelope(response: Response) -> Response {
    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) || is_json(response.headers()) {
        return response;
    }

    let (parts, body) = response.into_parts();
    let text = body::to_bytes(body, MAX_ERROR_BODY)
        .await
        .map(|bytes| String::from_utf8_lossy(&bytes).trim().to_string())
        .unwrap_or_default();
    let message = if text.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_lowercase()
    } else {
        text
    };

    let mut rewritten = envelope(status, message);
    if let Some(allow) = parts.headers.get(header::ALLOW) {
        rewritten.headers_mut().insert(header::ALLOW, allow.clone());
    }
    rewritten
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"))
}

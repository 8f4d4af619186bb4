//! The error envelope every failure is rendered as:
//! `{"success": false, "error": <status code>, "message": <text>}`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crudkit_auth::AuthzError;
use crudkit_core::DomainError;
use crudkit_infra::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed or incomplete request.
    #[error("{0}")]
    BadRequest(String),

    /// Missing/invalid credentials, or a permission the caller lacks.
    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    /// Well-formed request the data cannot satisfy (duplicate, dangling reference, empty pool).
    #[error("{0}")]
    Unprocessable(String),

    /// Logged in full; clients only see a generic message.
    #[error("internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::Internal(detail) => {
                tracing::error!(%detail, "request failed");
                "internal server error".to_string()
            }
            ApiError::BadRequest(m)
            | ApiError::Unauthorized(m)
            | ApiError::NotFound(m)
            | ApiError::Unprocessable(m) => m,
        };
        envelope(status, message)
    }
}

pub fn envelope(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(json!({
            "success": false,
            "error": status.as_u16(),
            "message": message.into(),
        })),
    )
        .into_response()
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(_) | DomainError::InvalidId(_) => ApiError::BadRequest(err.to_string()),
            DomainError::NotFound(_) => ApiError::NotFound(err.to_string()),
            DomainError::Conflict(_) | DomainError::InvariantViolation(_) => {
                ApiError::Unprocessable(err.to_string())
            }
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(msg) | StoreError::MissingReference(msg) => ApiError::Unprocessable(msg),
            StoreError::Domain(e) => e.into(),
            StoreError::Backend(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<AuthzError> for ApiError {
    fn from(err: AuthzError) -> Self {
        match err {
            AuthzError::PermissionsClaimMissing => ApiError::BadRequest(err.to_string()),
            AuthzError::Forbidden(_) => ApiError::Unauthorized(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_map_to_the_expected_statuses() {
        let cases = [
            (StoreError::Conflict("dup".into()), StatusCode::UNPROCESSABLE_ENTITY),
            (StoreError::MissingReference("artist 9".into()), StatusCode::UNPROCESSABLE_ENTITY),
            (StoreError::Domain(DomainError::validation("x")), StatusCode::BAD_REQUEST),
            (StoreError::Backend("pool closed".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }

    #[test]
    fn missing_permissions_claim_is_a_bad_request() {
        assert_eq!(
            ApiError::from(AuthzError::PermissionsClaimMissing).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(AuthzError::Forbidden("post:drinks".into())).status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn internal_detail_is_not_leaked() {
        let resp = ApiError::Internal("connection refused on 10.0.0.3".into()).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

use axum::{Json, http::Uri};
use serde_json::{Value, json};

use crate::app::errors::ApiError;

pub async fn health() -> Json<Value> {
    Json(json!({ "success": true }))
}

pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("no resource at {}", uri.path()))
}

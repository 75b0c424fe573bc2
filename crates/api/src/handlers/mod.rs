pub mod auth;
pub mod booking;
pub mod bookings;
pub mod browse;
pub mod providers;
pub mod slots;

use axum::{http::StatusCode, Json};
use serde_json::json;

/// Fallback for API method routers: any verb without a registered handler
/// gets a JSON 405 body instead of axum's empty response.
pub async fn method_not_allowed() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "error": "Method not allowed" })),
    )
}

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/register", post(handlers::auth::register))
        .route("/logout", post(handlers::auth::logout))
        .route(
            "/verify-phone",
            get(handlers::auth::verify_phone_status).post(handlers::auth::verify_phone),
        )
        .route("/resend-otp", post(handlers::auth::resend_otp))
}

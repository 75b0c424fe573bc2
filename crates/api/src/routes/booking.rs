use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/book/:slot_id", post(handlers::booking::book_slot))
        .route("/my-appointments", get(handlers::booking::my_appointments))
        .route("/my-schedule", get(handlers::booking::my_schedule))
}

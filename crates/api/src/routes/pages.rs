use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/", get(handlers::browse::home))
        .route("/slots", get(handlers::browse::slots_page))
        .route(
            "/specialization/:name",
            get(handlers::browse::specialization_page),
        )
        .route(
            "/provider/:provider_id",
            get(handlers::browse::provider_detail),
        )
}

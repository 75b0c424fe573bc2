use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

/// The JSON CRUD surface. Every method router carries a fallback so verbs
/// outside GET/POST/PUT/DELETE answer 405 with a JSON error body.
pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/slots",
            get(handlers::slots::list_slots)
                .post(handlers::slots::create_slot)
                .fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/slots/:slot_id",
            get(handlers::slots::get_slot)
                .put(handlers::slots::update_slot)
                .delete(handlers::slots::delete_slot)
                .fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/providers",
            get(handlers::providers::list_providers)
                .post(handlers::providers::create_provider)
                .fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/providers/:provider_id",
            get(handlers::providers::get_provider)
                .put(handlers::providers::update_provider)
                .delete(handlers::providers::delete_provider)
                .fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/bookings",
            get(handlers::bookings::list_bookings)
                .post(handlers::bookings::create_booking)
                .fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/bookings/:booking_id",
            get(handlers::bookings::get_booking)
                .put(handlers::bookings::update_booking)
                .delete(handlers::bookings::delete_booking)
                .fallback(handlers::method_not_allowed),
        )
}

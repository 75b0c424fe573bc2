//! CRUD over bookings for administrative use.
//!
//! Unlike the interactive flow, these operations do not check phone
//! verification, slot availability, or booking status: creating a booking
//! marks its slot booked no matter what, reassigning one moves the flag
//! unconditionally, and deleting one releases the flag even when the booking
//! was cancelled. See DESIGN.md for why this stays unguarded.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use careslot_core::{
    errors::BookingError,
    models::api::{CreatedResponse, StatusResponse},
    models::booking::{BookingResponse, CreateBookingRequest, UpdateBookingRequest},
};

use crate::{middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn list_bookings(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<BookingResponse>>, AppError> {
    let bookings = careslot_db::repositories::booking::list_bookings(&state.db_pool).await?;

    Ok(Json(
        bookings
            .into_iter()
            .map(|b| BookingResponse {
                id: b.id,
                client_id: b.client_id,
                slot_id: b.slot_id,
                created_at: b.created_at,
            })
            .collect(),
    ))
}

#[axum::debug_handler]
pub async fn get_booking(
    State(state): State<Arc<ApiState>>,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<BookingResponse>, AppError> {
    let booking =
        careslot_db::repositories::booking::get_booking_by_id(&state.db_pool, booking_id)
            .await?
            .ok_or_else(|| {
                BookingError::NotFound(format!("Booking with ID {} not found", booking_id))
            })?;

    Ok(Json(BookingResponse {
        id: booking.id,
        client_id: booking.client_id,
        slot_id: booking.slot_id,
        created_at: booking.created_at,
    }))
}

#[axum::debug_handler]
pub async fn create_booking(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    careslot_db::repositories::account::get_user_by_id(&state.db_pool, payload.client_id)
        .await?
        .ok_or_else(|| {
            BookingError::NotFound(format!("User with ID {} not found", payload.client_id))
        })?;

    careslot_db::repositories::time_slot::get_time_slot_by_id(&state.db_pool, payload.slot_id)
        .await?
        .ok_or_else(|| {
            BookingError::NotFound(format!("Slot with ID {} not found", payload.slot_id))
        })?;

    let booking = careslot_db::repositories::booking::create_booking(
        &state.db_pool,
        payload.client_id,
        payload.slot_id,
        "pending",
    )
    .await?;

    // Flag set regardless of the slot's prior state.
    careslot_db::repositories::time_slot::set_booked(&state.db_pool, payload.slot_id, true)
        .await?;

    Ok((StatusCode::CREATED, Json(CreatedResponse::new(booking.id))))
}

#[axum::debug_handler]
pub async fn update_booking(
    State(state): State<Arc<ApiState>>,
    Path(booking_id): Path<Uuid>,
    Json(payload): Json<UpdateBookingRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    let booking =
        careslot_db::repositories::booking::get_booking_by_id(&state.db_pool, booking_id)
            .await?
            .ok_or_else(|| {
                BookingError::NotFound(format!("Booking with ID {} not found", booking_id))
            })?;

    if let Some(new_slot_id) = payload.slot_id {
        careslot_db::repositories::time_slot::get_time_slot_by_id(&state.db_pool, new_slot_id)
            .await?
            .ok_or_else(|| {
                BookingError::NotFound(format!("Slot with ID {} not found", new_slot_id))
            })?;

        // Release the old slot and take the new one, without checking the
        // new slot's availability.
        careslot_db::repositories::time_slot::set_booked(&state.db_pool, booking.slot_id, false)
            .await?;
        careslot_db::repositories::time_slot::set_booked(&state.db_pool, new_slot_id, true)
            .await?;
    }

    careslot_db::repositories::booking::update_booking(
        &state.db_pool,
        booking_id,
        payload.slot_id,
        payload.client_id,
    )
    .await?;

    Ok(Json(StatusResponse::new("updated")))
}

#[axum::debug_handler]
pub async fn delete_booking(
    State(state): State<Arc<ApiState>>,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<StatusResponse>, AppError> {
    let booking =
        careslot_db::repositories::booking::get_booking_by_id(&state.db_pool, booking_id)
            .await?
            .ok_or_else(|| {
                BookingError::NotFound(format!("Booking with ID {} not found", booking_id))
            })?;

    // The flag is released even for cancelled bookings.
    careslot_db::repositories::time_slot::set_booked(&state.db_pool, booking.slot_id, false)
        .await?;
    careslot_db::repositories::booking::delete_booking(&state.db_pool, booking_id).await?;

    Ok(Json(StatusResponse::new("deleted")))
}

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
    models::time_slot::{CreateTimeSlotRequest, SlotResponse, UpdateTimeSlotRequest},
    scheduling,
};

use crate::{middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn list_slots(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<SlotResponse>>, AppError> {
    let slots = careslot_db::repositories::time_slot::list_slots(&state.db_pool).await?;

    Ok(Json(slots.into_iter().map(SlotResponse::from).collect()))
}

#[axum::debug_handler]
pub async fn get_slot(
    State(state): State<Arc<ApiState>>,
    Path(slot_id): Path<Uuid>,
) -> Result<Json<SlotResponse>, AppError> {
    let slot =
        careslot_db::repositories::time_slot::get_slot_detail_by_id(&state.db_pool, slot_id)
            .await?
            .ok_or_else(|| {
                BookingError::NotFound(format!("Slot with ID {} not found", slot_id))
            })?;

    Ok(Json(slot.into()))
}

#[axum::debug_handler]
pub async fn create_slot(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateTimeSlotRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    scheduling::validate_slot_times(payload.start_time, payload.end_time)?;

    careslot_db::repositories::provider::get_provider_by_id(&state.db_pool, payload.provider_id)
        .await?
        .ok_or_else(|| {
            BookingError::NotFound(format!(
                "Provider with ID {} not found",
                payload.provider_id
            ))
        })?;

    let slot = careslot_db::repositories::time_slot::create_time_slot(
        &state.db_pool,
        payload.provider_id,
        payload.start_time,
        payload.end_time,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(CreatedResponse::new(slot.id))))
}

#[axum::debug_handler]
pub async fn update_slot(
    State(state): State<Arc<ApiState>>,
    Path(slot_id): Path<Uuid>,
    Json(payload): Json<UpdateTimeSlotRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    let slot =
        careslot_db::repositories::time_slot::get_time_slot_by_id(&state.db_pool, slot_id)
            .await?
            .ok_or_else(|| {
                BookingError::NotFound(format!("Slot with ID {} not found", slot_id))
            })?;

    // Validate the range the update would leave behind.
    let start_time = payload.start_time.unwrap_or(slot.start_time);
    let end_time = payload.end_time.unwrap_or(slot.end_time);
    scheduling::validate_slot_times(start_time, end_time)?;

    careslot_db::repositories::time_slot::update_time_slot(
        &state.db_pool,
        slot_id,
        payload.start_time,
        payload.end_time,
        payload.is_booked,
    )
    .await?;

    Ok(Json(StatusResponse::new("updated")))
}

#[axum::debug_handler]
pub async fn delete_slot(
    State(state): State<Arc<ApiState>>,
    Path(slot_id): Path<Uuid>,
) -> Result<Json<StatusResponse>, AppError> {
    careslot_db::repositories::time_slot::get_time_slot_by_id(&state.db_pool, slot_id)
        .await?
        .ok_or_else(|| BookingError::NotFound(format!("Slot with ID {} not found", slot_id)))?;

    careslot_db::repositories::time_slot::delete_time_slot(&state.db_pool, slot_id).await?;

    Ok(Json(StatusResponse::new("deleted")))
}

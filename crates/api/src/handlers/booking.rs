use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use careslot_core::{
    errors::BookingError,
    models::account::AccountRole,
    models::booking::{BookingConfirmation, BookingStatus},
    models::provider::Specialization,
    models::schedule::{
        AppointmentEntry, AppointmentsResponse, ProviderScheduleResponse, ScheduleBooking,
        ScheduleEntry,
    },
    scheduling,
};

use crate::{
    middleware::{auth::AuthUser, error_handling::AppError},
    ApiState,
};

#[axum::debug_handler]
pub async fn book_slot(
    State(state): State<Arc<ApiState>>,
    AuthUser(claims): AuthUser,
    Path(slot_id): Path<Uuid>,
) -> Result<Json<BookingConfirmation>, AppError> {
    let slot =
        careslot_db::repositories::time_slot::get_time_slot_by_id(&state.db_pool, slot_id)
            .await?
            .ok_or_else(|| {
                BookingError::NotFound(format!("Slot with ID {} not found", slot_id))
            })?;

    // Providers skip the phone check.
    let phone_verified = if claims.role == AccountRole::Provider {
        true
    } else {
        careslot_db::repositories::patient_profile::get_profile_by_user_id(
            &state.db_pool,
            claims.sub,
        )
        .await?
        .map(|p| p.is_phone_verified)
        .unwrap_or(false)
    };

    scheduling::authorize_booking(claims.role, phone_verified, slot.is_booked)?;

    // The authoritative reservation: only one request can flip the flag.
    let claimed =
        careslot_db::repositories::time_slot::try_claim_slot(&state.db_pool, slot_id).await?;
    if !claimed {
        return Err(AppError(BookingError::Conflict(
            "This slot is already booked.".to_string(),
        )));
    }

    let booking = careslot_db::repositories::booking::create_booking(
        &state.db_pool,
        claims.sub,
        slot_id,
        "confirmed",
    )
    .await?;

    let detail = careslot_db::repositories::time_slot::get_slot_detail_by_id(
        &state.db_pool,
        slot_id,
    )
    .await?
    .ok_or_else(|| BookingError::NotFound(format!("Slot with ID {} not found", slot_id)))?;

    let specialization: Specialization = detail
        .specialization
        .parse()
        .map_err(|e: String| BookingError::Database(eyre::eyre!(e)))?;

    tracing::info!(
        "Slot {} booked by {} (booking {})",
        slot_id,
        claims.username,
        booking.id
    );

    Ok(Json(BookingConfirmation {
        booking_id: booking.id,
        slot_id,
        provider: detail.provider_username,
        specialization,
        start_time: detail.start_time,
        end_time: detail.end_time,
        status: BookingStatus::Confirmed,
    }))
}

#[axum::debug_handler]
pub async fn my_appointments(
    State(state): State<Arc<ApiState>>,
    AuthUser(claims): AuthUser,
) -> Result<Json<AppointmentsResponse>, AppError> {
    let rows = careslot_db::repositories::booking::list_appointments_by_client(
        &state.db_pool,
        claims.sub,
    )
    .await?;

    let mut entries = Vec::with_capacity(rows.len());
    for row in rows {
        entries.push(AppointmentEntry {
            booking_id: row.booking_id,
            slot_id: row.slot_id,
            provider: row.provider_username,
            specialization: row
                .specialization
                .parse()
                .map_err(|e: String| BookingError::Database(eyre::eyre!(e)))?,
            start_time: row.start_time,
            end_time: row.end_time,
            status: row.status.parse().map_err(|e: String| BookingError::Database(eyre::eyre!(e)))?,
            booked_at: row.booked_at,
        });
    }

    let (upcoming, past) = scheduling::partition_appointments(entries, Utc::now());

    Ok(Json(AppointmentsResponse { upcoming, past }))
}

#[axum::debug_handler]
pub async fn my_schedule(
    State(state): State<Arc<ApiState>>,
    AuthUser(claims): AuthUser,
) -> Result<Json<ProviderScheduleResponse>, AppError> {
    let provider = careslot_db::repositories::provider::get_provider_by_user_id(
        &state.db_pool,
        claims.sub,
    )
    .await?
    .ok_or_else(|| {
        BookingError::Authorization("You are not registered as a doctor.".to_string())
    })?;

    let rows = careslot_db::repositories::booking::list_schedule_for_provider(
        &state.db_pool,
        provider.id,
    )
    .await?;

    let mut entries = Vec::with_capacity(rows.len());
    for row in rows {
        let booking = match (row.booking_id, row.client_username, row.status, row.booked_at) {
            (Some(booking_id), Some(client), Some(status), Some(booked_at)) => {
                Some(ScheduleBooking {
                    booking_id,
                    client,
                    status: status.parse().map_err(|e: String| BookingError::Database(eyre::eyre!(e)))?,
                    booked_at,
                })
            }
            _ => None,
        };

        entries.push(ScheduleEntry {
            slot_id: row.slot_id,
            start_time: row.start_time,
            end_time: row.end_time,
            is_booked: row.is_booked,
            booking,
        });
    }

    let specialization: Specialization = provider
        .specialization
        .parse()
        .map_err(|e: String| BookingError::Database(eyre::eyre!(e)))?;

    Ok(Json(ProviderScheduleResponse {
        provider_id: provider.id,
        provider: claims.username,
        specialization,
        entries,
    }))
}

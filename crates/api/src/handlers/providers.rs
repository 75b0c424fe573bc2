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
    models::provider::{
        CreateProviderRequest, ProviderResponse, Specialization, UpdateProviderRequest,
    },
};

use crate::{middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn list_providers(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<ProviderResponse>>, AppError> {
    let providers = careslot_db::repositories::provider::list_providers(&state.db_pool).await?;

    let mut out = Vec::with_capacity(providers.len());
    for provider in providers {
        out.push(ProviderResponse {
            id: provider.id,
            username: provider.username,
            specialization: provider
                .specialization
                .parse()
                .map_err(|e: String| BookingError::Database(eyre::eyre!(e)))?,
        });
    }

    Ok(Json(out))
}

#[axum::debug_handler]
pub async fn get_provider(
    State(state): State<Arc<ApiState>>,
    Path(provider_id): Path<Uuid>,
) -> Result<Json<ProviderResponse>, AppError> {
    let provider = careslot_db::repositories::provider::get_provider_detail_by_id(
        &state.db_pool,
        provider_id,
    )
    .await?
    .ok_or_else(|| {
        BookingError::NotFound(format!("Provider with ID {} not found", provider_id))
    })?;

    Ok(Json(ProviderResponse {
        id: provider.id,
        username: provider.username,
        specialization: provider
            .specialization
            .parse()
            .map_err(|e: String| BookingError::Database(eyre::eyre!(e)))?,
    }))
}

#[axum::debug_handler]
pub async fn create_provider(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateProviderRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    // The specialization must come from the fixed enumeration.
    let specialization: Specialization = payload
        .specialization
        .parse()
        .map_err(BookingError::Validation)?;

    careslot_db::repositories::account::get_user_by_id(&state.db_pool, payload.user_id)
        .await?
        .ok_or_else(|| {
            BookingError::NotFound(format!("User with ID {} not found", payload.user_id))
        })?;

    let provider = careslot_db::repositories::provider::create_provider(
        &state.db_pool,
        payload.user_id,
        specialization.as_str(),
        None,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(CreatedResponse::new(provider.id))))
}

#[axum::debug_handler]
pub async fn update_provider(
    State(state): State<Arc<ApiState>>,
    Path(provider_id): Path<Uuid>,
    Json(payload): Json<UpdateProviderRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    careslot_db::repositories::provider::get_provider_by_id(&state.db_pool, provider_id)
        .await?
        .ok_or_else(|| {
            BookingError::NotFound(format!("Provider with ID {} not found", provider_id))
        })?;

    let specialization = match &payload.specialization {
        Some(raw) => Some(
            raw.parse::<Specialization>()
                .map_err(BookingError::Validation)?,
        ),
        None => None,
    };

    careslot_db::repositories::provider::update_provider(
        &state.db_pool,
        provider_id,
        specialization.map(|s| s.as_str()),
        payload.photo_url.as_deref(),
    )
    .await?;

    Ok(Json(StatusResponse::new("updated")))
}

#[axum::debug_handler]
pub async fn delete_provider(
    State(state): State<Arc<ApiState>>,
    Path(provider_id): Path<Uuid>,
) -> Result<Json<StatusResponse>, AppError> {
    careslot_db::repositories::provider::get_provider_by_id(&state.db_pool, provider_id)
        .await?
        .ok_or_else(|| {
            BookingError::NotFound(format!("Provider with ID {} not found", provider_id))
        })?;

    careslot_db::repositories::provider::delete_provider(&state.db_pool, provider_id).await?;

    Ok(Json(StatusResponse::new("deleted")))
}

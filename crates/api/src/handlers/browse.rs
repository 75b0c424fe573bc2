use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use careslot_core::{
    errors::BookingError,
    models::provider::{ProviderDetailResponse, Specialization, SpecializationOption},
    models::schedule::HomeResponse,
    models::time_slot::{SlotResponse, SlotsPageResponse, SpecializationPageResponse},
};

use crate::{middleware::error_handling::AppError, ApiState};

fn specialization_options() -> Vec<SpecializationOption> {
    Specialization::ALL.iter().map(|s| (*s).into()).collect()
}

/// Mirrors Python's str.capitalize for the specialization heading.
fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

#[axum::debug_handler]
pub async fn home() -> Json<HomeResponse> {
    Json(HomeResponse {
        specializations: specialization_options(),
    })
}

#[derive(Debug, Deserialize)]
pub struct SlotsQuery {
    pub spec: Option<String>,
}

#[axum::debug_handler]
pub async fn slots_page(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<SlotsQuery>,
) -> Result<Json<SlotsPageResponse>, AppError> {
    let selected_spec = query.spec.filter(|s| !s.is_empty());

    let slots = match &selected_spec {
        Some(spec) => {
            careslot_db::repositories::time_slot::list_slots_by_specialization(
                &state.db_pool,
                spec,
            )
            .await?
        }
        None => careslot_db::repositories::time_slot::list_slots(&state.db_pool).await?,
    };

    Ok(Json(SlotsPageResponse {
        slots: slots.into_iter().map(SlotResponse::from).collect(),
        specializations: specialization_options(),
        selected_spec,
    }))
}

#[axum::debug_handler]
pub async fn specialization_page(
    State(state): State<Arc<ApiState>>,
    Path(name): Path<String>,
) -> Result<Json<SpecializationPageResponse>, AppError> {
    // Unknown names simply match nothing.
    let slots = careslot_db::repositories::time_slot::list_slots_by_specialization(
        &state.db_pool,
        &name,
    )
    .await?;

    Ok(Json(SpecializationPageResponse {
        specialization: capitalize(&name),
        slots: slots.into_iter().map(SlotResponse::from).collect(),
    }))
}

#[axum::debug_handler]
pub async fn provider_detail(
    State(state): State<Arc<ApiState>>,
    Path(provider_id): Path<Uuid>,
) -> Result<Json<ProviderDetailResponse>, AppError> {
    let detail = careslot_db::repositories::provider::get_provider_detail_by_id(
        &state.db_pool,
        provider_id,
    )
    .await?
    .ok_or_else(|| {
        BookingError::NotFound(format!("Provider with ID {} not found", provider_id))
    })?;

    let slots = careslot_db::repositories::time_slot::list_slots_by_provider(
        &state.db_pool,
        provider_id,
    )
    .await?;

    let specialization: Specialization = detail
        .specialization
        .parse()
        .map_err(|e: String| BookingError::Database(eyre::eyre!(e)))?;

    let full_name = format!("{} {}", detail.first_name, detail.last_name)
        .trim()
        .to_string();

    Ok(Json(ProviderDetailResponse {
        id: detail.id,
        username: detail.username.clone(),
        full_name,
        specialization,
        photo_url: detail.photo_url,
        slots: slots
            .into_iter()
            .map(|slot| SlotResponse {
                id: slot.id,
                provider_id: slot.provider_id,
                provider: detail.username.clone(),
                start_time: slot.start_time,
                end_time: slot.end_time,
                is_booked: slot.is_booked,
            })
            .collect(),
    }))
}

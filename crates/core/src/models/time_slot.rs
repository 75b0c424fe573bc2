use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::provider::SpecializationOption;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: Uuid,
    pub provider_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub is_booked: bool,
    pub created_at: DateTime<Utc>,
}

/// Slot as exposed by the API and the browse pages: the raw record plus the
/// provider's display name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotResponse {
    pub id: Uuid,
    pub provider_id: Uuid,
    pub provider: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub is_booked: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTimeSlotRequest {
    pub provider_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTimeSlotRequest {
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub is_booked: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotsPageResponse {
    pub slots: Vec<SlotResponse>,
    pub specializations: Vec<SpecializationOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_spec: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecializationPageResponse {
    pub specialization: String,
    pub slots: Vec<SlotResponse>,
}

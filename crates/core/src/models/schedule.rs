use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::booking::BookingStatus;
use crate::models::provider::{Specialization, SpecializationOption};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeResponse {
    pub specializations: Vec<SpecializationOption>,
}

/// One of the client's bookings, joined with slot and provider details for
/// the appointment history view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentEntry {
    pub booking_id: Uuid,
    pub slot_id: Uuid,
    pub provider: String,
    pub specialization: Specialization,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: BookingStatus,
    pub booked_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentsResponse {
    pub upcoming: Vec<AppointmentEntry>,
    pub past: Vec<AppointmentEntry>,
}

/// Booking details attached to a slot in the provider's schedule view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleBooking {
    pub booking_id: Uuid,
    pub client: String,
    pub status: BookingStatus,
    pub booked_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub slot_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub is_booked: bool,
    pub booking: Option<ScheduleBooking>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderScheduleResponse {
    pub provider_id: Uuid,
    pub provider: String,
    pub specialization: Specialization,
    pub entries: Vec<ScheduleEntry>,
}

use chrono::{DateTime, Utc};
use eyre::eyre;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use careslot_core::models::account::Account;
use careslot_core::models::booking::Booking;
use careslot_core::models::provider::Provider;
use careslot_core::models::time_slot::{SlotResponse, TimeSlot};

// Row types stay on plain SQL-friendly types; enum-valued columns are TEXT
// here and parse into the core enums at the edge.

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbPatientProfile {
    pub user_id: Uuid,
    pub phone_number: String,
    pub is_phone_verified: bool,
    pub otp_code: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbProvider {
    pub id: Uuid,
    pub user_id: Uuid,
    pub specialization: String,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbTimeSlot {
    pub id: Uuid,
    pub provider_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub is_booked: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBooking {
    pub id: Uuid,
    pub client_id: Uuid,
    pub slot_id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Provider joined with its user record for display.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbProviderDetail {
    pub id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub specialization: String,
    pub photo_url: Option<String>,
}

/// Slot joined with provider display info, as the browse pages and the
/// slots API list it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSlotDetail {
    pub id: Uuid,
    pub provider_id: Uuid,
    pub provider_username: String,
    pub specialization: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub is_booked: bool,
}

/// One of a client's bookings joined with slot and provider, ordered by the
/// slot's start time for the appointment history view.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointmentRow {
    pub booking_id: Uuid,
    pub slot_id: Uuid,
    pub provider_username: String,
    pub specialization: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: String,
    pub booked_at: DateTime<Utc>,
}

/// One slot of a provider's schedule with its booking, when one exists. The
/// LEFT JOIN assumes at most one booking per slot.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbScheduleRow {
    pub slot_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub is_booked: bool,
    pub booking_id: Option<Uuid>,
    pub client_username: Option<String>,
    pub status: Option<String>,
    pub booked_at: Option<DateTime<Utc>>,
}

impl TryFrom<DbUser> for Account {
    type Error = eyre::Report;

    fn try_from(row: DbUser) -> Result<Self, Self::Error> {
        Ok(Account {
            id: row.id,
            username: row.username,
            email: row.email,
            first_name: row.first_name,
            last_name: row.last_name,
            role: row.role.parse().map_err(|e| eyre!("{}", e))?,
            created_at: row.created_at,
        })
    }
}

impl TryFrom<DbProvider> for Provider {
    type Error = eyre::Report;

    fn try_from(row: DbProvider) -> Result<Self, Self::Error> {
        Ok(Provider {
            id: row.id,
            user_id: row.user_id,
            specialization: row.specialization.parse().map_err(|e| eyre!("{}", e))?,
            photo_url: row.photo_url,
            created_at: row.created_at,
        })
    }
}

impl TryFrom<DbBooking> for Booking {
    type Error = eyre::Report;

    fn try_from(row: DbBooking) -> Result<Self, Self::Error> {
        Ok(Booking {
            id: row.id,
            client_id: row.client_id,
            slot_id: row.slot_id,
            status: row.status.parse().map_err(|e| eyre!("{}", e))?,
            created_at: row.created_at,
        })
    }
}

impl From<DbTimeSlot> for TimeSlot {
    fn from(row: DbTimeSlot) -> Self {
        TimeSlot {
            id: row.id,
            provider_id: row.provider_id,
            start_time: row.start_time,
            end_time: row.end_time,
            is_booked: row.is_booked,
            created_at: row.created_at,
        }
    }
}

impl From<DbSlotDetail> for SlotResponse {
    fn from(row: DbSlotDetail) -> Self {
        SlotResponse {
            id: row.id,
            provider_id: row.provider_id,
            provider: row.provider_username,
            start_time: row.start_time,
            end_time: row.end_time,
            is_booked: row.is_booked,
        }
    }
}

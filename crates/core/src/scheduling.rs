//! Booking rules shared by the interactive flow and the views.

use chrono::{DateTime, Utc};

use crate::errors::{BookingError, BookingResult};
use crate::models::account::AccountRole;
use crate::models::booking::BookingStatus;
use crate::models::schedule::AppointmentEntry;

/// A slot must end after it starts.
pub fn validate_slot_times(
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
) -> BookingResult<()> {
    if end_time <= start_time {
        return Err(BookingError::Validation(
            "end_time must be after start_time".to_string(),
        ));
    }
    Ok(())
}

/// Gate for the interactive booking flow: providers may always book, patients
/// only once their phone is verified, and nobody may take a slot that is
/// already flagged as booked.
pub fn authorize_booking(
    role: AccountRole,
    phone_verified: bool,
    slot_is_booked: bool,
) -> BookingResult<()> {
    if role != AccountRole::Provider && !phone_verified {
        return Err(BookingError::VerificationRequired(
            "Please verify your phone number before booking.".to_string(),
        ));
    }

    if slot_is_booked {
        return Err(BookingError::Conflict(
            "This slot is already booked.".to_string(),
        ));
    }

    Ok(())
}

/// Splits a client's bookings into upcoming and past. Upcoming means the slot
/// has not started yet and the booking is not cancelled; everything else is
/// past. The relative order of the input (descending by start time, as the
/// query returns it) is preserved in both halves.
pub fn partition_appointments(
    bookings: Vec<AppointmentEntry>,
    now: DateTime<Utc>,
) -> (Vec<AppointmentEntry>, Vec<AppointmentEntry>) {
    bookings
        .into_iter()
        .partition(|b| b.start_time >= now && b.status != BookingStatus::Cancelled)
}

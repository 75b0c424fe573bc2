use crate::models::{DbAppointmentRow, DbBooking, DbScheduleRow};
use chrono::Utc;
use eyre::{eyre, Result};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_booking(
    pool: &Pool<Postgres>,
    client_id: Uuid,
    slot_id: Uuid,
    status: &str,
) -> Result<DbBooking> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating booking: id={}, client_id={}, slot_id={}, status={}",
        id,
        client_id,
        slot_id,
        status
    );

    let booking = sqlx::query_as::<_, DbBooking>(
        r#"
        INSERT INTO bookings (id, client_id, slot_id, status, created_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, client_id, slot_id, status, created_at
        "#,
    )
    .bind(id)
    .bind(client_id)
    .bind(slot_id)
    .bind(status)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(booking)
}

pub async fn get_booking_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbBooking>> {
    let booking = sqlx::query_as::<_, DbBooking>(
        r#"
        SELECT id, client_id, slot_id, status, created_at
        FROM bookings
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(booking)
}

pub async fn list_bookings(pool: &Pool<Postgres>) -> Result<Vec<DbBooking>> {
    let bookings = sqlx::query_as::<_, DbBooking>(
        r#"
        SELECT id, client_id, slot_id, status, created_at
        FROM bookings
        ORDER BY created_at ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(bookings)
}

pub async fn bookings_exist(pool: &Pool<Postgres>) -> Result<bool> {
    let exists = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS (SELECT 1 FROM bookings)
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(exists)
}

/// A client's bookings joined with slot and provider details, newest slot
/// first, for the appointment history view.
pub async fn list_appointments_by_client(
    pool: &Pool<Postgres>,
    client_id: Uuid,
) -> Result<Vec<DbAppointmentRow>> {
    let rows = sqlx::query_as::<_, DbAppointmentRow>(
        r#"
        SELECT b.id AS booking_id, b.slot_id, u.username AS provider_username,
               p.specialization, s.start_time, s.end_time, b.status,
               b.created_at AS booked_at
        FROM bookings b
        JOIN time_slots s ON s.id = b.slot_id
        JOIN providers p ON p.id = s.provider_id
        JOIN users u ON u.id = p.user_id
        WHERE b.client_id = $1
        ORDER BY s.start_time DESC
        "#,
    )
    .bind(client_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// A provider's slots with the booking attached to each, if any. One row per
/// slot, assuming at most one booking references a slot.
pub async fn list_schedule_for_provider(
    pool: &Pool<Postgres>,
    provider_id: Uuid,
) -> Result<Vec<DbScheduleRow>> {
    let rows = sqlx::query_as::<_, DbScheduleRow>(
        r#"
        SELECT s.id AS slot_id, s.start_time, s.end_time, s.is_booked,
               b.id AS booking_id, u.username AS client_username,
               b.status, b.created_at AS booked_at
        FROM time_slots s
        LEFT JOIN bookings b ON b.slot_id = s.id
        LEFT JOIN users u ON u.id = b.client_id
        WHERE s.provider_id = $1
        ORDER BY s.start_time ASC
        "#,
    )
    .bind(provider_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn update_booking(
    pool: &Pool<Postgres>,
    id: Uuid,
    slot_id: Option<Uuid>,
    client_id: Option<Uuid>,
) -> Result<DbBooking> {
    let booking = get_booking_by_id(pool, id)
        .await?
        .ok_or_else(|| eyre!("Booking not found"))?;

    let slot_id = slot_id.unwrap_or(booking.slot_id);
    let client_id = client_id.unwrap_or(booking.client_id);

    let updated = sqlx::query_as::<_, DbBooking>(
        r#"
        UPDATE bookings
        SET slot_id = $2, client_id = $3
        WHERE id = $1
        RETURNING id, client_id, slot_id, status, created_at
        "#,
    )
    .bind(id)
    .bind(slot_id)
    .bind(client_id)
    .fetch_one(pool)
    .await?;

    Ok(updated)
}

pub async fn delete_booking(pool: &Pool<Postgres>, id: Uuid) -> Result<()> {
    sqlx::query(
        r#"
        DELETE FROM bookings
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(())
}

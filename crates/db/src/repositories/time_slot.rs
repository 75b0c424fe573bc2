use crate::models::{DbSlotDetail, DbTimeSlot};
use chrono::{DateTime, Utc};
use eyre::{eyre, Result};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_time_slot(
    pool: &Pool<Postgres>,
    provider_id: Uuid,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
) -> Result<DbTimeSlot> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let time_slot = sqlx::query_as::<_, DbTimeSlot>(
        r#"
        INSERT INTO time_slots (id, provider_id, start_time, end_time, is_booked, created_at)
        VALUES ($1, $2, $3, $4, FALSE, $5)
        RETURNING id, provider_id, start_time, end_time, is_booked, created_at
        "#,
    )
    .bind(id)
    .bind(provider_id)
    .bind(start_time)
    .bind(end_time)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(time_slot)
}

pub async fn get_time_slot_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbTimeSlot>> {
    let time_slot = sqlx::query_as::<_, DbTimeSlot>(
        r#"
        SELECT id, provider_id, start_time, end_time, is_booked, created_at
        FROM time_slots
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(time_slot)
}

pub async fn get_slot_detail_by_id(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<DbSlotDetail>> {
    let slot = sqlx::query_as::<_, DbSlotDetail>(
        r#"
        SELECT s.id, s.provider_id, u.username AS provider_username,
               p.specialization, s.start_time, s.end_time, s.is_booked
        FROM time_slots s
        JOIN providers p ON p.id = s.provider_id
        JOIN users u ON u.id = p.user_id
        WHERE s.id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(slot)
}

pub async fn list_slots(pool: &Pool<Postgres>) -> Result<Vec<DbSlotDetail>> {
    let slots = sqlx::query_as::<_, DbSlotDetail>(
        r#"
        SELECT s.id, s.provider_id, u.username AS provider_username,
               p.specialization, s.start_time, s.end_time, s.is_booked
        FROM time_slots s
        JOIN providers p ON p.id = s.provider_id
        JOIN users u ON u.id = p.user_id
        ORDER BY s.start_time ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(slots)
}

pub async fn list_slots_by_specialization(
    pool: &Pool<Postgres>,
    specialization: &str,
) -> Result<Vec<DbSlotDetail>> {
    let slots = sqlx::query_as::<_, DbSlotDetail>(
        r#"
        SELECT s.id, s.provider_id, u.username AS provider_username,
               p.specialization, s.start_time, s.end_time, s.is_booked
        FROM time_slots s
        JOIN providers p ON p.id = s.provider_id
        JOIN users u ON u.id = p.user_id
        WHERE LOWER(p.specialization) = LOWER($1)
        ORDER BY s.start_time ASC
        "#,
    )
    .bind(specialization)
    .fetch_all(pool)
    .await?;

    Ok(slots)
}

pub async fn list_slots_by_provider(
    pool: &Pool<Postgres>,
    provider_id: Uuid,
) -> Result<Vec<DbTimeSlot>> {
    let slots = sqlx::query_as::<_, DbTimeSlot>(
        r#"
        SELECT id, provider_id, start_time, end_time, is_booked, created_at
        FROM time_slots
        WHERE provider_id = $1
        ORDER BY start_time ASC
        "#,
    )
    .bind(provider_id)
    .fetch_all(pool)
    .await?;

    Ok(slots)
}

pub async fn count_slots_by_provider(pool: &Pool<Postgres>, provider_id: Uuid) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM time_slots WHERE provider_id = $1
        "#,
    )
    .bind(provider_id)
    .fetch_one(pool)
    .await?;

    Ok(count)
}

pub async fn update_time_slot(
    pool: &Pool<Postgres>,
    id: Uuid,
    start_time: Option<DateTime<Utc>>,
    end_time: Option<DateTime<Utc>>,
    is_booked: Option<bool>,
) -> Result<DbTimeSlot> {
    let slot = get_time_slot_by_id(pool, id)
        .await?
        .ok_or_else(|| eyre!("Time slot not found"))?;

    let start_time = start_time.unwrap_or(slot.start_time);
    let end_time = end_time.unwrap_or(slot.end_time);
    let is_booked = is_booked.unwrap_or(slot.is_booked);

    let updated = sqlx::query_as::<_, DbTimeSlot>(
        r#"
        UPDATE time_slots
        SET start_time = $2, end_time = $3, is_booked = $4
        WHERE id = $1
        RETURNING id, provider_id, start_time, end_time, is_booked, created_at
        "#,
    )
    .bind(id)
    .bind(start_time)
    .bind(end_time)
    .bind(is_booked)
    .fetch_one(pool)
    .await?;

    Ok(updated)
}

/// Atomically claims an open slot. Returns false when the slot was already
/// booked (or does not exist); the WHERE clause makes two concurrent claims
/// on the same slot mutually exclusive.
pub async fn try_claim_slot(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE time_slots
        SET is_booked = TRUE
        WHERE id = $1 AND is_booked = FALSE
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    let claimed = result.rows_affected() == 1;
    tracing::debug!("Claim on slot {}: {}", id, if claimed { "won" } else { "lost" });

    Ok(claimed)
}

/// Unconditionally sets the booked flag. The bookings API uses this and
/// deliberately skips the availability check (see DESIGN.md).
pub async fn set_booked(pool: &Pool<Postgres>, id: Uuid, is_booked: bool) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE time_slots
        SET is_booked = $2
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(is_booked)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn delete_time_slot(pool: &Pool<Postgres>, id: Uuid) -> Result<()> {
    sqlx::query(
        r#"
        DELETE FROM time_slots
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(())
}

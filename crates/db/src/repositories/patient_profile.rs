use crate::models::DbPatientProfile;
use chrono::Utc;
use eyre::{eyre, Result};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use careslot_core::verification::PhoneVerification;

pub async fn create_profile(
    pool: &Pool<Postgres>,
    user_id: Uuid,
    phone_number: &str,
) -> Result<DbPatientProfile> {
    let now = Utc::now();

    tracing::debug!("Creating patient profile for user {}", user_id);

    let profile = sqlx::query_as::<_, DbPatientProfile>(
        r#"
        INSERT INTO patient_profiles (user_id, phone_number, is_phone_verified, otp_code, created_at)
        VALUES ($1, $2, FALSE, NULL, $3)
        RETURNING user_id, phone_number, is_phone_verified, otp_code, created_at
        "#,
    )
    .bind(user_id)
    .bind(phone_number)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(profile)
}

pub async fn get_profile_by_user_id(
    pool: &Pool<Postgres>,
    user_id: Uuid,
) -> Result<Option<DbPatientProfile>> {
    let profile = sqlx::query_as::<_, DbPatientProfile>(
        r#"
        SELECT user_id, phone_number, is_phone_verified, otp_code, created_at
        FROM patient_profiles
        WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(profile)
}

pub async fn phone_exists(pool: &Pool<Postgres>, phone_number: &str) -> Result<bool> {
    let exists = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS (SELECT 1 FROM patient_profiles WHERE phone_number = $1)
        "#,
    )
    .bind(phone_number)
    .fetch_one(pool)
    .await?;

    Ok(exists)
}

/// Persists the outcome of an OTP transition (generate or verify) back to the
/// profile row.
pub async fn store_verification(
    pool: &Pool<Postgres>,
    user_id: Uuid,
    verification: &PhoneVerification,
) -> Result<DbPatientProfile> {
    tracing::debug!(
        "Storing verification state for user {}: pending={}, verified={}",
        user_id,
        verification.is_pending(),
        verification.verified
    );

    let profile = sqlx::query_as::<_, DbPatientProfile>(
        r#"
        UPDATE patient_profiles
        SET otp_code = $2, is_phone_verified = $3
        WHERE user_id = $1
        RETURNING user_id, phone_number, is_phone_verified, otp_code, created_at
        "#,
    )
    .bind(user_id)
    .bind(verification.code.as_deref())
    .bind(verification.verified)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| eyre!("Patient profile not found for user {}", user_id))?;

    Ok(profile)
}

use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create users table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            username VARCHAR(150) NOT NULL UNIQUE,
            email VARCHAR(254) NOT NULL DEFAULT '',
            first_name VARCHAR(150) NOT NULL DEFAULT '',
            last_name VARCHAR(150) NOT NULL DEFAULT '',
            password_hash VARCHAR(255) NOT NULL,
            role VARCHAR(20) NOT NULL DEFAULT 'patient',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create patient_profiles table (one-to-one with users)
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS patient_profiles (
            user_id UUID PRIMARY KEY REFERENCES users(id) ON DELETE CASCADE,
            phone_number VARCHAR(20) NOT NULL UNIQUE,
            is_phone_verified BOOLEAN NOT NULL DEFAULT FALSE,
            otp_code VARCHAR(6) NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create providers table (one-to-one with users)
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS providers (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            user_id UUID NOT NULL UNIQUE REFERENCES users(id) ON DELETE CASCADE,
            specialization VARCHAR(100) NOT NULL DEFAULT 'therapist',
            photo_url VARCHAR(255) NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create time_slots table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS time_slots (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            provider_id UUID NOT NULL REFERENCES providers(id) ON DELETE CASCADE,
            start_time TIMESTAMP WITH TIME ZONE NOT NULL,
            end_time TIMESTAMP WITH TIME ZONE NOT NULL,
            is_booked BOOLEAN NOT NULL DEFAULT FALSE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_time_range CHECK (end_time > start_time)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create bookings table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS bookings (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            client_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            slot_id UUID NOT NULL REFERENCES time_slots(id) ON DELETE CASCADE,
            status VARCHAR(20) NOT NULL DEFAULT 'pending',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes (one statement per query; prepared statements don't batch)
    let indexes = [
        "CREATE INDEX IF NOT EXISTS idx_providers_user_id ON providers(user_id)",
        "CREATE INDEX IF NOT EXISTS idx_providers_specialization ON providers(specialization)",
        "CREATE INDEX IF NOT EXISTS idx_time_slots_provider_id ON time_slots(provider_id)",
        "CREATE INDEX IF NOT EXISTS idx_time_slots_start_time ON time_slots(start_time)",
        "CREATE INDEX IF NOT EXISTS idx_time_slots_is_booked ON time_slots(is_booked)",
        "CREATE INDEX IF NOT EXISTS idx_bookings_client_id ON bookings(client_id)",
        "CREATE INDEX IF NOT EXISTS idx_bookings_slot_id ON bookings(slot_id)",
        "CREATE INDEX IF NOT EXISTS idx_patient_profiles_phone ON patient_profiles(phone_number)",
    ];
    for statement in indexes {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}

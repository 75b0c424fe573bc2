//! Demo data: 8 doctors across the six specializations, 10 patients, four
//! half-hour slots per doctor, and a handful of bookings. Safe to run twice;
//! everything that already exists is skipped.

use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHasher};
use chrono::{Duration, Utc};
use eyre::{eyre, Result};
use rand::seq::SliceRandom;
use sqlx::{Pool, Postgres};
use tracing::{info, warn};

use crate::models::{DbProvider, DbTimeSlot, DbUser};
use crate::repositories::{account, booking, provider, time_slot};

const DOCTORS: [(&str, &str, &str, &str); 8] = [
    ("dr_smith", "John", "Smith", "cardiologist"),
    ("dr_johnson", "Emily", "Johnson", "dermatologist"),
    ("dr_williams", "Michael", "Williams", "gynecologist"),
    ("dr_brown", "Sarah", "Brown", "dentist"),
    ("dr_davis", "David", "Davis", "therapist"),
    ("dr_wilson", "Anna", "Wilson", "pediatrician"),
    ("dr_lee", "James", "Lee", "cardiologist"),
    ("dr_taylor", "Maria", "Taylor", "dermatologist"),
];

const PATIENTS: [(&str, &str, &str, &str); 10] = [
    ("alice_k", "Alice", "Kim", "alice.kim@mail.com"),
    ("bob_m", "Bob", "Martinez", "bob.martinez@mail.com"),
    ("clara_n", "Clara", "Nguyen", "clara.nguyen@mail.com"),
    ("daniel_o", "Daniel", "O'Brien", "daniel.obrien@mail.com"),
    ("elena_p", "Elena", "Petrova", "elena.petrova@mail.com"),
    ("frank_r", "Frank", "Robinson", "frank.robinson@mail.com"),
    ("grace_s", "Grace", "Singh", "grace.singh@mail.com"),
    ("henry_t", "Henry", "Thompson", "henry.thompson@mail.com"),
    ("irene_u", "Irene", "Ueda", "irene.ueda@mail.com"),
    ("jack_v", "Jack", "Vasquez", "jack.vasquez@mail.com"),
];

pub async fn seed_demo_data(pool: &Pool<Postgres>, reset: bool) -> Result<()> {
    if reset {
        reset_demo_data(pool).await?;
    }

    let providers = create_doctors(pool).await?;
    let patients = create_patients(pool).await?;
    let slots = create_slots(pool, &providers).await?;
    create_bookings(pool, &patients, &slots).await?;

    info!("Done! Sample data is ready.");
    Ok(())
}

fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| eyre!("Error hashing password: {}", e))?
        .to_string();
    Ok(hash)
}

async fn get_or_create_user(
    pool: &Pool<Postgres>,
    username: &str,
    email: &str,
    first_name: &str,
    last_name: &str,
    password: &str,
    role: &str,
) -> Result<(DbUser, bool)> {
    if let Some(user) = account::get_user_by_username(pool, username).await? {
        return Ok((user, false));
    }

    let user = account::create_user(
        pool,
        username,
        email,
        first_name,
        last_name,
        &hash_password(password)?,
        role,
    )
    .await?;

    Ok((user, true))
}

async fn create_doctors(pool: &Pool<Postgres>) -> Result<Vec<DbProvider>> {
    info!("--- Doctors ---");
    let mut providers = Vec::new();

    for (username, first, last, spec) in DOCTORS {
        let email = format!("{}@clinic.com", username);
        let (user, _) =
            get_or_create_user(pool, username, &email, first, last, "doctor123", "provider")
                .await?;

        let (record, created) = match provider::get_provider_by_user_id(pool, user.id).await? {
            Some(existing) => (existing, false),
            None => (
                provider::create_provider(pool, user.id, spec, None).await?,
                true,
            ),
        };

        info!(
            "  Dr. {} {} ({}) -- {}",
            first,
            last,
            spec,
            if created { "CREATED" } else { "exists" }
        );
        providers.push(record);
    }

    Ok(providers)
}

async fn create_patients(pool: &Pool<Postgres>) -> Result<Vec<DbUser>> {
    info!("--- Patients ---");
    let mut patients = Vec::new();

    for (username, first, last, email) in PATIENTS {
        let (user, created) =
            get_or_create_user(pool, username, email, first, last, "patient123", "patient")
                .await?;

        info!(
            "  {} {} ({}) -- {}",
            first,
            last,
            email,
            if created { "CREATED" } else { "exists" }
        );
        patients.push(user);
    }

    Ok(patients)
}

async fn create_slots(
    pool: &Pool<Postgres>,
    providers: &[DbProvider],
) -> Result<Vec<DbTimeSlot>> {
    info!("--- Time Slots ---");

    let base = (Utc::now() + Duration::days(1))
        .date_naive()
        .and_hms_opt(9, 0, 0)
        .ok_or_else(|| eyre!("Invalid base time for seed slots"))?
        .and_utc();

    let mut all_slots = Vec::new();

    for record in providers {
        let existing = time_slot::count_slots_by_provider(pool, record.id).await?;
        if existing >= 4 {
            info!(
                "  provider {} -- already has {} slots, skipping",
                record.id, existing
            );
            all_slots.extend(time_slot::list_slots_by_provider(pool, record.id).await?);
            continue;
        }

        // Four slots per doctor: 9:00, 11:00, 14:00, 16:00
        for hours in [0i64, 2, 5, 7] {
            let start = base + Duration::hours(hours);
            let slot =
                time_slot::create_time_slot(pool, record.id, start, start + Duration::minutes(30))
                    .await?;
            all_slots.push(slot);
        }
        info!("  provider {} -- 4 slots created", record.id);
    }

    Ok(all_slots)
}

async fn create_bookings(
    pool: &Pool<Postgres>,
    patients: &[DbUser],
    slots: &[DbTimeSlot],
) -> Result<()> {
    info!("--- Bookings ---");

    if booking::bookings_exist(pool).await? {
        info!("  Bookings already exist, skipping");
        return Ok(());
    }

    let mut available: Vec<&DbTimeSlot> = slots.iter().filter(|s| !s.is_booked).collect();
    let mut rng = rand::thread_rng();
    available.shuffle(&mut rng);

    let statuses = [
        "confirmed",
        "confirmed",
        "confirmed",
        "pending",
        "pending",
        "cancelled",
    ];

    let mut booked_count = 0;
    for (i, patient) in patients.iter().enumerate() {
        let Some(slot) = available.get(i) else {
            break;
        };
        let status = statuses
            .choose(&mut rng)
            .copied()
            .unwrap_or("pending");

        booking::create_booking(pool, patient.id, slot.id, status).await?;

        // Cancelled sample bookings leave the slot open.
        if status != "cancelled" {
            time_slot::set_booked(pool, slot.id, true).await?;
        }

        booked_count += 1;
        info!(
            "  {} {} -> slot {} ({}) -- {}",
            patient.first_name,
            patient.last_name,
            slot.id,
            slot.start_time.format("%b %d %H:%M"),
            status.to_uppercase()
        );
    }

    info!("  Total: {} bookings", booked_count);
    Ok(())
}

async fn reset_demo_data(pool: &Pool<Postgres>) -> Result<()> {
    warn!("Resetting sample data...");

    let usernames: Vec<String> = DOCTORS
        .iter()
        .map(|(u, ..)| u.to_string())
        .chain(PATIENTS.iter().map(|(u, ..)| u.to_string()))
        .collect();

    // FK cascades take bookings, slots, providers and profiles with the users.
    sqlx::query(
        r#"
        DELETE FROM users WHERE username = ANY($1)
        "#,
    )
    .bind(&usernames)
    .execute(pool)
    .await?;

    info!("  Cleared all sample doctors, patients, slots and bookings.");
    Ok(())
}

use crate::models::{DbProvider, DbProviderDetail};
use chrono::Utc;
use eyre::{eyre, Result};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_provider(
    pool: &Pool<Postgres>,
    user_id: Uuid,
    specialization: &str,
    photo_url: Option<&str>,
) -> Result<DbProvider> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating provider: id={}, user_id={}, specialization={}",
        id,
        user_id,
        specialization
    );

    let provider = sqlx::query_as::<_, DbProvider>(
        r#"
        INSERT INTO providers (id, user_id, specialization, photo_url, created_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, user_id, specialization, photo_url, created_at
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(specialization)
    .bind(photo_url)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(provider)
}

pub async fn get_provider_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbProvider>> {
    let provider = sqlx::query_as::<_, DbProvider>(
        r#"
        SELECT id, user_id, specialization, photo_url, created_at
        FROM providers
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(provider)
}

pub async fn get_provider_by_user_id(
    pool: &Pool<Postgres>,
    user_id: Uuid,
) -> Result<Option<DbProvider>> {
    let provider = sqlx::query_as::<_, DbProvider>(
        r#"
        SELECT id, user_id, specialization, photo_url, created_at
        FROM providers
        WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(provider)
}

pub async fn get_provider_detail_by_id(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<DbProviderDetail>> {
    let provider = sqlx::query_as::<_, DbProviderDetail>(
        r#"
        SELECT p.id, p.user_id, u.username, u.first_name, u.last_name,
               p.specialization, p.photo_url
        FROM providers p
        JOIN users u ON u.id = p.user_id
        WHERE p.id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(provider)
}

pub async fn list_providers(pool: &Pool<Postgres>) -> Result<Vec<DbProviderDetail>> {
    let providers = sqlx::query_as::<_, DbProviderDetail>(
        r#"
        SELECT p.id, p.user_id, u.username, u.first_name, u.last_name,
               p.specialization, p.photo_url
        FROM providers p
        JOIN users u ON u.id = p.user_id
        ORDER BY u.username ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(providers)
}

pub async fn update_provider(
    pool: &Pool<Postgres>,
    id: Uuid,
    specialization: Option<&str>,
    photo_url: Option<&str>,
) -> Result<DbProvider> {
    let provider = get_provider_by_id(pool, id)
        .await?
        .ok_or_else(|| eyre!("Provider not found"))?;

    let specialization = specialization.unwrap_or(&provider.specialization);
    let photo_url = photo_url.or(provider.photo_url.as_deref());

    let updated = sqlx::query_as::<_, DbProvider>(
        r#"
        UPDATE providers
        SET specialization = $2, photo_url = $3
        WHERE id = $1
        RETURNING id, user_id, specialization, photo_url, created_at
        "#,
    )
    .bind(id)
    .bind(specialization)
    .bind(photo_url)
    .fetch_one(pool)
    .await?;

    Ok(updated)
}

pub async fn delete_provider(pool: &Pool<Postgres>, id: Uuid) -> Result<()> {
    sqlx::query(
        r#"
        DELETE FROM providers
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(())
}

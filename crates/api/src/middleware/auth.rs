//! # Authentication Module
//!
//! Password hashing/verification for user accounts (Argon2) and the bearer
//! token layer: login issues a signed JWT, and the [`AuthUser`] extractor
//! validates it on protected routes.

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHasher, PasswordVerifier,
};
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use chrono::{Duration, Utc};
use eyre::Result;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use careslot_core::errors::{BookingError, BookingResult};
use careslot_core::models::account::{Account, AccountRole};

use crate::{middleware::error_handling::AppError, ApiState};

/// Hashes a password using the Argon2 algorithm.
///
/// A random salt is generated per password; the result is a PHC string that
/// embeds algorithm, parameters, salt and hash.
pub fn hash_password(password: &str) -> Result<String> {
    // Generate a fresh, random salt
    let salt = SaltString::generate(&mut OsRng);

    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| eyre::eyre!("Error hashing password: {}", e))?
        .to_string();

    Ok(password_hash)
}

/// Verifies a password against a stored PHC hash string.
pub fn verify_password(hash: &str, password: &str) -> Result<bool> {
    let parsed_hash = argon2::PasswordHash::new(hash)
        .map_err(|e| eyre::eyre!("Invalid password hash: {}", e))?;
    let is_valid = Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok();
    Ok(is_valid)
}

/// Claims carried in the bearer token. Enough to authorize every route
/// without a user lookup: handlers that need profile state fetch it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub username: String,
    pub role: AccountRole,
    pub iat: i64,
    pub exp: i64,
}

const TOKEN_LIFETIME_HOURS: i64 = 24;

/// Issues a signed token for a freshly authenticated account.
pub fn issue_token(account: &Account, secret: &str) -> BookingResult<String> {
    let now = Utc::now();
    let claims = Claims {
        sub: account.id,
        username: account.username.clone(),
        role: account.role,
        iat: now.timestamp(),
        exp: (now + Duration::hours(TOKEN_LIFETIME_HOURS)).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| BookingError::Internal(Box::new(e)))
}

/// Decodes and validates a token, including its expiry.
pub fn decode_token(token: &str, secret: &str) -> BookingResult<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| BookingError::Authentication(format!("Invalid token: {}", e)))
}

/// Extractor for authenticated routes: reads the `Authorization: Bearer`
/// header and validates the token against the configured secret.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

#[async_trait]
impl FromRequestParts<Arc<ApiState>> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ApiState>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .ok_or_else(|| {
                AppError(BookingError::Authentication(
                    "Missing authorization header".to_string(),
                ))
            })?;

        let value = header.to_str().map_err(|_| {
            AppError(BookingError::Authentication(
                "Invalid authorization header format".to_string(),
            ))
        })?;

        let token = value.strip_prefix("Bearer ").ok_or_else(|| {
            AppError(BookingError::Authentication(
                "Invalid authorization header format".to_string(),
            ))
        })?;

        let claims = decode_token(token, &state.config.jwt_secret)?;

        Ok(AuthUser(claims))
    }
}

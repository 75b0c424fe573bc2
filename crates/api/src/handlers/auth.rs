use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use careslot_core::{
    errors::BookingError,
    models::account::{
        Account, AuthResponse, LoginRequest, PhoneVerificationStatus, RegisterRequest,
        VerifyPhoneRequest, VerifyPhoneResponse,
    },
    models::api::StatusResponse,
    verification::PhoneVerification,
};

use crate::{
    middleware::{auth, error_handling::AppError},
    ApiState,
};

#[axum::debug_handler]
pub async fn register(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let username = payload.username.trim().to_string();
    let email = payload.email.trim().to_string();
    let first_name = payload.first_name.trim().to_string();
    let last_name = payload.last_name.trim().to_string();
    let phone = payload.phone_number.trim().to_string();

    // Validation order matches the registration form, first failure wins.
    if payload.password != payload.password2 {
        return Err(AppError(BookingError::Validation(
            "Passwords do not match.".to_string(),
        )));
    }

    if careslot_db::repositories::account::username_exists(&state.db_pool, &username).await? {
        return Err(AppError(BookingError::Validation(
            "Username already taken.".to_string(),
        )));
    }

    if payload.password.len() < 4 {
        return Err(AppError(BookingError::Validation(
            "Password must be at least 4 characters.".to_string(),
        )));
    }

    if phone.is_empty() {
        return Err(AppError(BookingError::Validation(
            "Phone number is required.".to_string(),
        )));
    }

    if careslot_db::repositories::patient_profile::phone_exists(&state.db_pool, &phone).await? {
        return Err(AppError(BookingError::Validation(
            "This phone number is already registered.".to_string(),
        )));
    }

    let password_hash = auth::hash_password(&payload.password)?;

    let db_user = careslot_db::repositories::account::create_user(
        &state.db_pool,
        &username,
        &email,
        &first_name,
        &last_name,
        &password_hash,
        "patient",
    )
    .await?;

    careslot_db::repositories::patient_profile::create_profile(&state.db_pool, db_user.id, &phone)
        .await?;

    // Issue the first OTP right away; the client is sent to /verify-phone.
    let mut verification = PhoneVerification::unverified();
    let otp = verification.generate();
    careslot_db::repositories::patient_profile::store_verification(
        &state.db_pool,
        db_user.id,
        &verification,
    )
    .await?;

    // In production this would send a real SMS; for now the code rides along
    // in the response.
    tracing::info!("OTP code sent to {}: {}", phone, otp);

    let account = Account::try_from(db_user)?;
    let token = auth::issue_token(&account, &state.config.jwt_secret)?;

    let response = AuthResponse {
        token,
        user: account,
        verification_required: true,
        otp_hint: Some(otp),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let username = payload.username.trim();

    let db_user =
        careslot_db::repositories::account::get_user_by_username(&state.db_pool, username)
            .await?
            .ok_or_else(|| {
                BookingError::Authentication("Invalid username or password.".to_string())
            })?;

    if !auth::verify_password(&db_user.password_hash, &payload.password)? {
        return Err(AppError(BookingError::Authentication(
            "Invalid username or password.".to_string(),
        )));
    }

    let account = Account::try_from(db_user)?;
    let token = auth::issue_token(&account, &state.config.jwt_secret)?;

    // A patient with an unverified phone gets a fresh OTP and is expected to
    // verify before booking.
    let profile = careslot_db::repositories::patient_profile::get_profile_by_user_id(
        &state.db_pool,
        account.id,
    )
    .await?;

    let (verification_required, otp_hint) = match profile {
        Some(profile) if !profile.is_phone_verified => {
            let mut verification =
                PhoneVerification::from_parts(profile.otp_code, profile.is_phone_verified);
            let otp = verification.generate();
            careslot_db::repositories::patient_profile::store_verification(
                &state.db_pool,
                account.id,
                &verification,
            )
            .await?;

            tracing::info!("OTP sent to {}. Please verify.", profile.phone_number);
            (true, Some(otp))
        }
        _ => (false, None),
    };

    Ok(Json(AuthResponse {
        token,
        user: account,
        verification_required,
        otp_hint,
    }))
}

/// Tokens are stateless, so logout is an acknowledgement; the client drops
/// its token.
#[axum::debug_handler]
pub async fn logout() -> Json<StatusResponse> {
    Json(StatusResponse::new("logged_out"))
}

#[axum::debug_handler]
pub async fn verify_phone_status(
    State(state): State<Arc<ApiState>>,
    auth::AuthUser(claims): auth::AuthUser,
) -> Result<Json<PhoneVerificationStatus>, AppError> {
    let profile = careslot_db::repositories::patient_profile::get_profile_by_user_id(
        &state.db_pool,
        claims.sub,
    )
    .await?
    .ok_or_else(|| {
        BookingError::NotFound("No phone number associated with your account.".to_string())
    })?;

    Ok(Json(PhoneVerificationStatus {
        phone_number: profile.phone_number,
        is_phone_verified: profile.is_phone_verified,
        // Shown in lieu of SMS delivery.
        otp_hint: profile.otp_code,
    }))
}

#[axum::debug_handler]
pub async fn verify_phone(
    State(state): State<Arc<ApiState>>,
    auth::AuthUser(claims): auth::AuthUser,
    Json(payload): Json<VerifyPhoneRequest>,
) -> Result<Json<VerifyPhoneResponse>, AppError> {
    let profile = careslot_db::repositories::patient_profile::get_profile_by_user_id(
        &state.db_pool,
        claims.sub,
    )
    .await?
    .ok_or_else(|| {
        BookingError::NotFound("No phone number associated with your account.".to_string())
    })?;

    if profile.is_phone_verified {
        return Ok(Json(VerifyPhoneResponse {
            verified: true,
            message: "Your phone is already verified.".to_string(),
        }));
    }

    let mut verification =
        PhoneVerification::from_parts(profile.otp_code, profile.is_phone_verified);

    if !verification.verify(&payload.otp_code) {
        return Err(AppError(BookingError::Validation(
            "Invalid OTP code. Please try again.".to_string(),
        )));
    }

    careslot_db::repositories::patient_profile::store_verification(
        &state.db_pool,
        claims.sub,
        &verification,
    )
    .await?;

    Ok(Json(VerifyPhoneResponse {
        verified: true,
        message: "Phone number verified successfully!".to_string(),
    }))
}

#[axum::debug_handler]
pub async fn resend_otp(
    State(state): State<Arc<ApiState>>,
    auth::AuthUser(claims): auth::AuthUser,
) -> Result<Json<PhoneVerificationStatus>, AppError> {
    let profile = careslot_db::repositories::patient_profile::get_profile_by_user_id(
        &state.db_pool,
        claims.sub,
    )
    .await?
    .ok_or_else(|| {
        BookingError::NotFound("No phone number associated with your account.".to_string())
    })?;

    // Already verified: nothing to resend.
    if profile.is_phone_verified {
        return Ok(Json(PhoneVerificationStatus {
            phone_number: profile.phone_number,
            is_phone_verified: true,
            otp_hint: None,
        }));
    }

    let mut verification =
        PhoneVerification::from_parts(profile.otp_code, profile.is_phone_verified);
    let otp = verification.generate();
    careslot_db::repositories::patient_profile::store_verification(
        &state.db_pool,
        claims.sub,
        &verification,
    )
    .await?;

    tracing::info!("New OTP sent to {}: {}", profile.phone_number, otp);

    Ok(Json(PhoneVerificationStatus {
        phone_number: profile.phone_number,
        is_phone_verified: false,
        otp_hint: Some(otp),
    }))
}

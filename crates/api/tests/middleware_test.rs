use argon2::PasswordVerifier;
use chrono::Utc;
use uuid::Uuid;

use careslot_api::middleware::auth;
use careslot_core::errors::BookingError;
use careslot_core::models::account::{Account, AccountRole};

#[tokio::test]
async fn test_error_handling_not_found() {
    let error = BookingError::NotFound("Slot not found".to_string());
    let response = careslot_api::middleware::error_handling::map_error(error);
    assert_eq!(response.status(), axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_error_handling_validation() {
    let error = BookingError::Validation("Invalid input".to_string());
    let response = careslot_api::middleware::error_handling::map_error(error);
    assert_eq!(response.status(), axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_error_handling_authentication() {
    let error = BookingError::Authentication("Invalid password".to_string());
    let response = careslot_api::middleware::error_handling::map_error(error);
    assert_eq!(response.status(), axum::http::StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_error_handling_authorization() {
    let error = BookingError::Authorization("Not a doctor".to_string());
    let response = careslot_api::middleware::error_handling::map_error(error);
    assert_eq!(response.status(), axum::http::StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_error_handling_verification_required() {
    let error = BookingError::VerificationRequired(
        "Please verify your phone number before booking.".to_string(),
    );
    let response = careslot_api::middleware::error_handling::map_error(error);
    assert_eq!(response.status(), axum::http::StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_error_handling_conflict() {
    let error = BookingError::Conflict("This slot is already booked.".to_string());
    let response = careslot_api::middleware::error_handling::map_error(error);
    assert_eq!(response.status(), axum::http::StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_error_handling_database() {
    let error = BookingError::Database(eyre::eyre!("Database error"));
    let response = careslot_api::middleware::error_handling::map_error(error);
    assert_eq!(
        response.status(),
        axum::http::StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[tokio::test]
async fn test_error_handling_internal() {
    let error = BookingError::Internal(Box::new(std::io::Error::new(
        std::io::ErrorKind::Other,
        "Internal error",
    )));
    let response = careslot_api::middleware::error_handling::map_error(error);
    assert_eq!(
        response.status(),
        axum::http::StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[tokio::test]
async fn test_hash_password() {
    let password = "test_password";
    let hashed = auth::hash_password(password).unwrap();

    assert_ne!(hashed, password);
    assert!(hashed.starts_with("$argon2"));
}

#[tokio::test]
async fn test_verify_password_roundtrip() {
    let password = "patient123";
    let hashed = auth::hash_password(password).unwrap();

    assert!(auth::verify_password(&hashed, password).unwrap());
    assert!(!auth::verify_password(&hashed, "wrong_password").unwrap());

    // Cross-check against argon2 directly
    let argon2 = argon2::Argon2::default();
    let parsed_hash = argon2::PasswordHash::new(&hashed).unwrap();
    assert!(argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok());
}

fn test_account(role: AccountRole) -> Account {
    Account {
        id: Uuid::new_v4(),
        username: "alice_k".to_string(),
        email: "alice.kim@mail.com".to_string(),
        first_name: "Alice".to_string(),
        last_name: "Kim".to_string(),
        role,
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn test_token_roundtrip() {
    let account = test_account(AccountRole::Patient);
    let token = auth::issue_token(&account, "test-secret").unwrap();

    let claims = auth::decode_token(&token, "test-secret").unwrap();
    assert_eq!(claims.sub, account.id);
    assert_eq!(claims.username, account.username);
    assert_eq!(claims.role, AccountRole::Patient);
    assert!(claims.exp > claims.iat);
}

#[tokio::test]
async fn test_token_rejects_wrong_secret() {
    let account = test_account(AccountRole::Provider);
    let token = auth::issue_token(&account, "test-secret").unwrap();

    let result = auth::decode_token(&token, "other-secret");
    assert!(matches!(result, Err(BookingError::Authentication(_))));
}

#[tokio::test]
async fn test_token_rejects_garbage() {
    let result = auth::decode_token("not.a.token", "test-secret");
    assert!(matches!(result, Err(BookingError::Authentication(_))));
}

use careslot_core::errors::{BookingError, BookingResult};
use pretty_assertions::assert_eq;

#[test]
fn test_not_found_display() {
    let error = BookingError::NotFound("Slot with ID 42 not found".to_string());
    assert_eq!(
        error.to_string(),
        "Resource not found: Slot with ID 42 not found"
    );
}

#[test]
fn test_validation_display() {
    let error = BookingError::Validation("Passwords do not match.".to_string());
    assert_eq!(error.to_string(), "Validation error: Passwords do not match.");
}

#[test]
fn test_authentication_display() {
    let error = BookingError::Authentication("Invalid username or password.".to_string());
    assert_eq!(
        error.to_string(),
        "Authentication error: Invalid username or password."
    );
}

#[test]
fn test_verification_required_display() {
    let error = BookingError::VerificationRequired(
        "Please verify your phone number before booking.".to_string(),
    );
    assert_eq!(
        error.to_string(),
        "Phone verification required: Please verify your phone number before booking."
    );
}

#[test]
fn test_conflict_display() {
    let error = BookingError::Conflict("This slot is already booked.".to_string());
    assert_eq!(error.to_string(), "Conflict: This slot is already booked.");
}

#[test]
fn test_database_error_from_eyre() {
    fn failing() -> BookingResult<()> {
        Err(eyre::eyre!("connection refused"))?;
        Ok(())
    }

    let error = failing().unwrap_err();
    assert!(matches!(error, BookingError::Database(_)));
    assert!(error.to_string().contains("connection refused"));
}

#[test]
fn test_internal_error_from_boxed() {
    let source: Box<dyn std::error::Error + Send + Sync> =
        Box::new(std::io::Error::new(std::io::ErrorKind::Other, "boom"));
    let error = BookingError::Internal(source);
    assert!(error.to_string().starts_with("Internal server error"));
}

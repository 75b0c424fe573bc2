use careslot_core::models::account::{Account, AccountRole};
use careslot_core::models::api::{CreatedResponse, StatusResponse};
use careslot_core::models::booking::{Booking, BookingStatus, CreateBookingRequest};
use careslot_core::models::provider::{Specialization, SpecializationOption};
use careslot_core::models::time_slot::{CreateTimeSlotRequest, SlotResponse, TimeSlot};
use chrono::Utc;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{from_str, json, to_string, to_value};
use uuid::Uuid;

#[test]
fn test_account_serialization() {
    let account = Account {
        id: Uuid::new_v4(),
        username: "alice_k".to_string(),
        email: "alice.kim@mail.com".to_string(),
        first_name: "Alice".to_string(),
        last_name: "Kim".to_string(),
        role: AccountRole::Patient,
        created_at: Utc::now(),
    };

    let json = to_string(&account).expect("Failed to serialize account");
    let deserialized: Account = from_str(&json).expect("Failed to deserialize account");

    assert_eq!(deserialized.id, account.id);
    assert_eq!(deserialized.username, account.username);
    assert_eq!(deserialized.role, account.role);
    assert_eq!(deserialized.created_at, account.created_at);
}

#[test]
fn test_account_full_name() {
    let account = Account {
        id: Uuid::new_v4(),
        username: "dr_smith".to_string(),
        email: "dr_smith@clinic.com".to_string(),
        first_name: "John".to_string(),
        last_name: "Smith".to_string(),
        role: AccountRole::Provider,
        created_at: Utc::now(),
    };

    assert_eq!(account.full_name(), "John Smith");
}

#[test]
fn test_account_role_wire_format() {
    assert_eq!(to_value(AccountRole::Patient).unwrap(), json!("patient"));
    assert_eq!(to_value(AccountRole::Provider).unwrap(), json!("provider"));
    assert_eq!("provider".parse::<AccountRole>().unwrap(), AccountRole::Provider);
    assert!("admin".parse::<AccountRole>().is_err());
}

#[test]
fn test_time_slot_serialization() {
    let start_time = Utc::now();
    let time_slot = TimeSlot {
        id: Uuid::new_v4(),
        provider_id: Uuid::new_v4(),
        start_time,
        end_time: start_time + chrono::Duration::minutes(30),
        is_booked: false,
        created_at: Utc::now(),
    };

    let json = to_string(&time_slot).expect("Failed to serialize time slot");
    let deserialized: TimeSlot = from_str(&json).expect("Failed to deserialize time slot");

    assert_eq!(deserialized.id, time_slot.id);
    assert_eq!(deserialized.provider_id, time_slot.provider_id);
    assert_eq!(deserialized.start_time, time_slot.start_time);
    assert_eq!(deserialized.end_time, time_slot.end_time);
    assert_eq!(deserialized.is_booked, time_slot.is_booked);
}

#[test]
fn test_booking_serialization() {
    let booking = Booking {
        id: Uuid::new_v4(),
        client_id: Uuid::new_v4(),
        slot_id: Uuid::new_v4(),
        status: BookingStatus::Confirmed,
        created_at: Utc::now(),
    };

    let json = to_string(&booking).expect("Failed to serialize booking");
    let deserialized: Booking = from_str(&json).expect("Failed to deserialize booking");

    assert_eq!(deserialized.id, booking.id);
    assert_eq!(deserialized.client_id, booking.client_id);
    assert_eq!(deserialized.slot_id, booking.slot_id);
    assert_eq!(deserialized.status, booking.status);
}

#[rstest]
#[case(BookingStatus::Confirmed, "confirmed")]
#[case(BookingStatus::Pending, "pending")]
#[case(BookingStatus::Cancelled, "cancelled")]
fn test_booking_status_wire_format(#[case] status: BookingStatus, #[case] wire: &str) {
    assert_eq!(to_value(status).unwrap(), json!(wire));
    assert_eq!(wire.parse::<BookingStatus>().unwrap(), status);
    assert_eq!(status.to_string(), wire);
}

#[test]
fn test_booking_status_defaults_to_pending() {
    assert_eq!(BookingStatus::default(), BookingStatus::Pending);
}

#[rstest]
#[case(Specialization::Cardiologist, "cardiologist", "Cardiologist")]
#[case(Specialization::Dermatologist, "dermatologist", "Dermatologist")]
#[case(Specialization::Gynecologist, "gynecologist", "Gynecologist")]
#[case(Specialization::Dentist, "dentist", "Dentist")]
#[case(Specialization::Therapist, "therapist", "Therapist")]
#[case(Specialization::Pediatrician, "pediatrician", "Pediatrician")]
fn test_specialization_wire_and_label(
    #[case] spec: Specialization,
    #[case] wire: &str,
    #[case] label: &str,
) {
    assert_eq!(to_value(spec).unwrap(), json!(wire));
    assert_eq!(spec.as_str(), wire);
    assert_eq!(spec.label(), label);
}

#[test]
fn test_specialization_parse_is_case_insensitive() {
    assert_eq!(
        "Cardiologist".parse::<Specialization>().unwrap(),
        Specialization::Cardiologist
    );
    assert_eq!(
        "DENTIST".parse::<Specialization>().unwrap(),
        Specialization::Dentist
    );
    assert!("surgeon".parse::<Specialization>().is_err());
}

#[test]
fn test_specialization_defaults_to_therapist() {
    assert_eq!(Specialization::default(), Specialization::Therapist);
}

#[test]
fn test_specialization_all_covers_the_fixed_enumeration() {
    assert_eq!(Specialization::ALL.len(), 6);
    let options: Vec<SpecializationOption> =
        Specialization::ALL.iter().map(|s| (*s).into()).collect();
    assert_eq!(options[0].value, "cardiologist");
    assert_eq!(options[0].label, "Cardiologist");
}

#[test]
fn test_slot_response_shape_matches_api_contract() {
    let start_time = Utc::now();
    let response = SlotResponse {
        id: Uuid::new_v4(),
        provider_id: Uuid::new_v4(),
        provider: "dr_smith".to_string(),
        start_time,
        end_time: start_time + chrono::Duration::minutes(30),
        is_booked: true,
    };

    let value = to_value(&response).unwrap();
    assert!(value.get("id").is_some());
    assert!(value.get("provider_id").is_some());
    assert!(value.get("provider").is_some());
    assert_eq!(value.get("is_booked"), Some(&json!(true)));
}

#[test]
fn test_create_requests_deserialize_from_json_bodies() {
    let provider_id = Uuid::new_v4();
    let body = json!({
        "provider_id": provider_id,
        "start_time": "2026-08-07T09:00:00Z",
        "end_time": "2026-08-07T09:30:00Z"
    })
    .to_string();
    let request: CreateTimeSlotRequest = from_str(&body).unwrap();
    assert_eq!(request.provider_id, provider_id);
    assert!(request.end_time > request.start_time);

    let client_id = Uuid::new_v4();
    let slot_id = Uuid::new_v4();
    let body = json!({ "client_id": client_id, "slot_id": slot_id }).to_string();
    let request: CreateBookingRequest = from_str(&body).unwrap();
    assert_eq!(request.client_id, client_id);
    assert_eq!(request.slot_id, slot_id);
}

#[test]
fn test_api_envelopes() {
    let id = Uuid::new_v4();
    let created = CreatedResponse::new(id);
    assert_eq!(created.id, id);
    assert_eq!(created.status, "created");

    let updated = StatusResponse::new("updated");
    assert_eq!(to_value(&updated).unwrap(), json!({ "status": "updated" }));
}

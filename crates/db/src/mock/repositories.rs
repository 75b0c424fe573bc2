use chrono::{DateTime, Utc};
use mockall::mock;
use uuid::Uuid;

use careslot_core::verification::PhoneVerification;

use crate::models::{
    DbAppointmentRow, DbBooking, DbPatientProfile, DbProvider, DbProviderDetail, DbScheduleRow,
    DbSlotDetail, DbTimeSlot, DbUser,
};

// Mock repositories for testing. Arguments are owned so expectations don't
// need 'static borrows.
mock! {
    pub AccountRepo {
        pub async fn create_user(
            &self,
            username: String,
            email: String,
            first_name: String,
            last_name: String,
            password_hash: String,
            role: String,
        ) -> eyre::Result<DbUser>;

        pub async fn get_user_by_id(&self, id: Uuid) -> eyre::Result<Option<DbUser>>;

        pub async fn get_user_by_username(
            &self,
            username: String,
        ) -> eyre::Result<Option<DbUser>>;

        pub async fn username_exists(&self, username: String) -> eyre::Result<bool>;
    }
}

mock! {
    pub PatientProfileRepo {
        pub async fn create_profile(
            &self,
            user_id: Uuid,
            phone_number: String,
        ) -> eyre::Result<DbPatientProfile>;

        pub async fn get_profile_by_user_id(
            &self,
            user_id: Uuid,
        ) -> eyre::Result<Option<DbPatientProfile>>;

        pub async fn phone_exists(&self, phone_number: String) -> eyre::Result<bool>;

        pub async fn store_verification(
            &self,
            user_id: Uuid,
            verification: PhoneVerification,
        ) -> eyre::Result<DbPatientProfile>;
    }
}

mock! {
    pub ProviderRepo {
        pub async fn create_provider(
            &self,
            user_id: Uuid,
            specialization: String,
            photo_url: Option<String>,
        ) -> eyre::Result<DbProvider>;

        pub async fn get_provider_by_id(&self, id: Uuid) -> eyre::Result<Option<DbProvider>>;

        pub async fn get_provider_by_user_id(
            &self,
            user_id: Uuid,
        ) -> eyre::Result<Option<DbProvider>>;

        pub async fn get_provider_detail_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbProviderDetail>>;

        pub async fn list_providers(&self) -> eyre::Result<Vec<DbProviderDetail>>;

        pub async fn update_provider(
            &self,
            id: Uuid,
            specialization: Option<String>,
            photo_url: Option<String>,
        ) -> eyre::Result<DbProvider>;

        pub async fn delete_provider(&self, id: Uuid) -> eyre::Result<()>;
    }
}

mock! {
    pub TimeSlotRepo {
        pub async fn create_time_slot(
            &self,
            provider_id: Uuid,
            start_time: DateTime<Utc>,
            end_time: DateTime<Utc>,
        ) -> eyre::Result<DbTimeSlot>;

        pub async fn get_time_slot_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbTimeSlot>>;

        pub async fn get_slot_detail_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbSlotDetail>>;

        pub async fn list_slots(&self) -> eyre::Result<Vec<DbSlotDetail>>;

        pub async fn list_slots_by_specialization(
            &self,
            specialization: String,
        ) -> eyre::Result<Vec<DbSlotDetail>>;

        pub async fn list_slots_by_provider(
            &self,
            provider_id: Uuid,
        ) -> eyre::Result<Vec<DbTimeSlot>>;

        pub async fn update_time_slot(
            &self,
            id: Uuid,
            start_time: Option<DateTime<Utc>>,
            end_time: Option<DateTime<Utc>>,
            is_booked: Option<bool>,
        ) -> eyre::Result<DbTimeSlot>;

        pub async fn try_claim_slot(&self, id: Uuid) -> eyre::Result<bool>;

        pub async fn set_booked(&self, id: Uuid, is_booked: bool) -> eyre::Result<()>;

        pub async fn delete_time_slot(&self, id: Uuid) -> eyre::Result<()>;
    }
}

mock! {
    pub BookingRepo {
        pub async fn create_booking(
            &self,
            client_id: Uuid,
            slot_id: Uuid,
            status: String,
        ) -> eyre::Result<DbBooking>;

        pub async fn get_booking_by_id(&self, id: Uuid) -> eyre::Result<Option<DbBooking>>;

        pub async fn list_bookings(&self) -> eyre::Result<Vec<DbBooking>>;

        pub async fn list_appointments_by_client(
            &self,
            client_id: Uuid,
        ) -> eyre::Result<Vec<DbAppointmentRow>>;

        pub async fn list_schedule_for_provider(
            &self,
            provider_id: Uuid,
        ) -> eyre::Result<Vec<DbScheduleRow>>;

        pub async fn update_booking(
            &self,
            id: Uuid,
            slot_id: Option<Uuid>,
            client_id: Option<Uuid>,
        ) -> eyre::Result<DbBooking>;

        pub async fn delete_booking(&self, id: Uuid) -> eyre::Result<()>;
    }
}

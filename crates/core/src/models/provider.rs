use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::models::time_slot::SlotResponse;

/// The fixed set of clinician specializations offered by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Specialization {
    Cardiologist,
    Dermatologist,
    Gynecologist,
    Dentist,
    Therapist,
    Pediatrician,
}

impl Specialization {
    pub const ALL: [Specialization; 6] = [
        Specialization::Cardiologist,
        Specialization::Dermatologist,
        Specialization::Gynecologist,
        Specialization::Dentist,
        Specialization::Therapist,
        Specialization::Pediatrician,
    ];

    /// Human-readable label, e.g. "Cardiologist".
    pub fn label(&self) -> &'static str {
        match self {
            Specialization::Cardiologist => "Cardiologist",
            Specialization::Dermatologist => "Dermatologist",
            Specialization::Gynecologist => "Gynecologist",
            Specialization::Dentist => "Dentist",
            Specialization::Therapist => "Therapist",
            Specialization::Pediatrician => "Pediatrician",
        }
    }

    /// Wire value, e.g. "cardiologist".
    pub fn as_str(&self) -> &'static str {
        match self {
            Specialization::Cardiologist => "cardiologist",
            Specialization::Dermatologist => "dermatologist",
            Specialization::Gynecologist => "gynecologist",
            Specialization::Dentist => "dentist",
            Specialization::Therapist => "therapist",
            Specialization::Pediatrician => "pediatrician",
        }
    }
}

impl Default for Specialization {
    fn default() -> Self {
        Specialization::Therapist
    }
}

impl fmt::Display for Specialization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Specialization {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cardiologist" => Ok(Specialization::Cardiologist),
            "dermatologist" => Ok(Specialization::Dermatologist),
            "gynecologist" => Ok(Specialization::Gynecologist),
            "dentist" => Ok(Specialization::Dentist),
            "therapist" => Ok(Specialization::Therapist),
            "pediatrician" => Ok(Specialization::Pediatrician),
            other => Err(format!("Unknown specialization: {}", other)),
        }
    }
}

/// One entry of the specialization listing on the home page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecializationOption {
    pub value: String,
    pub label: String,
}

impl From<Specialization> for SpecializationOption {
    fn from(spec: Specialization) -> Self {
        SpecializationOption {
            value: spec.as_str().to_string(),
            label: spec.label().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Provider {
    pub id: Uuid,
    pub user_id: Uuid,
    pub specialization: Specialization,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderResponse {
    pub id: Uuid,
    pub username: String,
    pub specialization: Specialization,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProviderRequest {
    pub user_id: Uuid,
    pub specialization: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProviderRequest {
    pub specialization: Option<String>,
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderDetailResponse {
    pub id: Uuid,
    pub username: String,
    pub full_name: String,
    pub specialization: Specialization,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    pub slots: Vec<SlotResponse>,
}

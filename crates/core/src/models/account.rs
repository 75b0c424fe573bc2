use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Role carried on every account, as an explicit tag: handlers match on it
/// rather than probing for the presence of a related provider record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountRole {
    Patient,
    Provider,
}

impl fmt::Display for AccountRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountRole::Patient => write!(f, "patient"),
            AccountRole::Provider => write!(f, "provider"),
        }
    }
}

impl FromStr for AccountRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "patient" => Ok(AccountRole::Patient),
            "provider" => Ok(AccountRole::Provider),
            other => Err(format!("Unknown account role: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: AccountRole,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub password2: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: Account,
    /// True when the account still has to complete phone verification; the
    /// client is expected to go to /verify-phone next.
    pub verification_required: bool,
    /// Demo shortcut: the OTP is returned in the response instead of being
    /// delivered over SMS.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub otp_hint: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyPhoneRequest {
    #[serde(default)]
    pub otp_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyPhoneResponse {
    pub verified: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhoneVerificationStatus {
    pub phone_number: String,
    pub is_phone_verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub otp_hint: Option<String>,
}

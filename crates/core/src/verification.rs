//! Phone verification via one-time codes.
//!
//! The verification state of a patient profile is an explicit value object
//! passed through the two transition functions below. The db layer persists
//! whatever state comes out; nothing here does IO.
//!
//! State machine: unverified -> (generate) code-pending -> (verify ok)
//! verified. A failed verify leaves the state untouched, and a resend simply
//! overwrites the stored code. There is no expiry or rate limiting.

use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneVerification {
    /// Outstanding one-time code, if one has been issued and not yet used.
    pub code: Option<String>,
    pub verified: bool,
}

impl PhoneVerification {
    pub fn unverified() -> Self {
        PhoneVerification {
            code: None,
            verified: false,
        }
    }

    /// Reconstructs the state as loaded from storage.
    pub fn from_parts(code: Option<String>, verified: bool) -> Self {
        PhoneVerification { code, verified }
    }

    /// True while a code is outstanding.
    pub fn is_pending(&self) -> bool {
        self.code.is_some() && !self.verified
    }

    /// Issues a fresh 6-digit decimal code, replacing any outstanding one,
    /// and returns it. The caller surfaces the code to the user in lieu of
    /// real SMS delivery.
    pub fn generate(&mut self) -> String {
        self.generate_with(&mut rand::thread_rng())
    }

    pub fn generate_with<R: Rng>(&mut self, rng: &mut R) -> String {
        let code = rng.gen_range(100_000..=999_999).to_string();
        self.code = Some(code.clone());
        code
    }

    /// Checks a submitted code against the outstanding one. Whitespace around
    /// the submission is ignored. On success the phone becomes verified and
    /// the code is cleared; on failure nothing changes.
    pub fn verify(&mut self, submitted: &str) -> bool {
        match &self.code {
            Some(code) if code == submitted.trim() => {
                self.verified = true;
                self.code = None;
                true
            }
            _ => false,
        }
    }
}

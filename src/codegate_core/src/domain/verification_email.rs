use std::fmt;

use super::verification_code::{CodePurpose, VerificationCode};

/// The plain-text message carrying one verification code.
#[derive(Clone, PartialEq)]
pub struct VerificationEmail {
    pub purpose: CodePurpose,
    pub subject: &'static str,
    pub body: String,
}

impl VerificationEmail {
    pub fn new(purpose: CodePurpose, code: &VerificationCode, ttl_minutes: u64) -> Self {
        Self {
            purpose,
            subject: purpose.email_subject(),
            body: purpose.email_body(code, ttl_minutes),
        }
    }
}

// The body holds the code.
impl fmt::Debug for VerificationEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerificationEmail")
            .field("purpose", &self.purpose)
            .field("subject", &self.subject)
            .finish_non_exhaustive()
    }
}

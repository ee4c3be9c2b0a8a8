use std::time::Duration;

use chrono::{DateTime, Utc};

use super::{
    email::Email,
    verification_code::{CodePurpose, VerificationCode},
};

/// A code that has been stored and handed to the email transport.
#[derive(Debug, Clone)]
pub struct IssuedCode {
    pub purpose: CodePurpose,
    pub email: Email,
    pub code: VerificationCode,
    pub issued_at: DateTime<Utc>,
    pub ttl: Duration,
}

impl IssuedCode {
    pub fn expires_at(&self) -> DateTime<Utc> {
        let ttl = chrono::Duration::from_std(self.ttl).unwrap_or(chrono::Duration::MAX);
        self.issued_at
            .checked_add_signed(ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

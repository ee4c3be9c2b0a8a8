use std::fmt;

use rand::{TryCryptoRng, rngs::OsRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of distinct codes; codes are rendered as six zero-padded digits.
const CODE_SPACE: u32 = 1_000_000;
const CODE_LENGTH: usize = 6;
/// Largest multiple of `CODE_SPACE` that fits in a `u32`. Samples at or above
/// it are redrawn so the reduction modulo `CODE_SPACE` stays uniform.
const ACCEPT_BELOW: u32 = u32::MAX - (u32::MAX % CODE_SPACE);

#[derive(Debug, Error, PartialEq)]
pub enum CodeError {
    #[error("Randomness source failed: {0}")]
    RandomnessFailure(String),
    #[error("Verification code must be exactly 6 digits")]
    Malformed,
}

/// Why a verification code was issued.
///
/// Codes are namespaced by purpose, so a pending registration code survives a
/// password recovery request for the same address and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodePurpose {
    Register,
    Recover,
}

impl CodePurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            CodePurpose::Register => "register",
            CodePurpose::Recover => "recover",
        }
    }

    pub fn email_subject(&self) -> &'static str {
        match self {
            CodePurpose::Register => "Confirm your registration",
            CodePurpose::Recover => "Password Recovery Code",
        }
    }

    pub fn email_body(&self, code: &VerificationCode, ttl_minutes: u64) -> String {
        let action = match self {
            CodePurpose::Register => "registration confirmation",
            CodePurpose::Recover => "password recovery",
        };
        format!(
            "Your {action} code is: {}. It expires in {ttl_minutes} minutes.",
            code.as_str()
        )
    }
}

impl fmt::Display for CodePurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A six digit numeric one-time code.
#[derive(Clone, PartialEq, Eq)]
pub struct VerificationCode(String);

impl VerificationCode {
    /// Draw a fresh code from the operating system CSPRNG.
    pub fn generate() -> Result<Self, CodeError> {
        Self::generate_with(&mut OsRng)
    }

    /// Draw a fresh code from the given cryptographically secure source.
    ///
    /// A failing source is reported, never replaced by a weaker one.
    pub fn generate_with<R>(rng: &mut R) -> Result<Self, CodeError>
    where
        R: TryCryptoRng + ?Sized,
    {
        loop {
            let sample = rng
                .try_next_u32()
                .map_err(|e| CodeError::RandomnessFailure(e.to_string()))?;

            if sample < ACCEPT_BELOW {
                return Ok(Self(format!("{:06}", sample % CODE_SPACE)));
            }
        }
    }

    pub fn parse(raw: &str) -> Result<Self, CodeError> {
        let trimmed = raw.trim();
        if trimmed.len() != CODE_LENGTH || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CodeError::Malformed);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for VerificationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("VerificationCode(******)")
    }
}

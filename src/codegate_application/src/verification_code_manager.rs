use std::time::Duration;

use chrono::Utc;
use codegate_core::{
    CodeCheck, CodeError, CodePurpose, CodeStoreError, Email, EmailClient, IssuedCode,
    VerificationCode, VerificationCodeStore, VerificationEmail,
};

const DEFAULT_CODE_TTL: Duration = Duration::from_secs(180);
const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Lifetime and attempt budget of issued codes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerificationSettings {
    pub ttl: Duration,
    pub max_attempts: u32,
}

impl Default for VerificationSettings {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_CODE_TTL,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Error types for issuing and verifying codes
#[derive(Debug, thiserror::Error)]
pub enum VerificationError {
    #[error("Failed to generate verification code: {0}")]
    RandomnessFailure(String),
    #[error("Verification store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("Verification code expired or email not found")]
    CodeExpiredOrUnknown,
    #[error("Incorrect verification code")]
    IncorrectCode,
    #[error("Too many incorrect attempts, request a new code")]
    TooManyAttempts,
    #[error("Failed to send verification email: {0}")]
    EmailDeliveryFailure(String),
}

impl From<CodeStoreError> for VerificationError {
    fn from(error: CodeStoreError) -> Self {
        match error {
            CodeStoreError::Unavailable(e) => VerificationError::StoreUnavailable(e),
        }
    }
}

impl From<CodeError> for VerificationError {
    fn from(error: CodeError) -> Self {
        match error {
            CodeError::RandomnessFailure(e) => VerificationError::RandomnessFailure(e),
            CodeError::Malformed => VerificationError::IncorrectCode,
        }
    }
}

/// Issues and checks one-time email codes.
///
/// All state lives in the injected store; the manager itself is stateless and
/// cheap to clone into request handlers.
#[derive(Clone)]
pub struct VerificationCodeManager<S, E>
where
    S: VerificationCodeStore,
    E: EmailClient,
{
    code_store: S,
    email_client: E,
    settings: VerificationSettings,
}

impl<S, E> VerificationCodeManager<S, E>
where
    S: VerificationCodeStore,
    E: EmailClient,
{
    pub fn new(code_store: S, email_client: E, settings: VerificationSettings) -> Self {
        Self {
            code_store,
            email_client,
            settings,
        }
    }

    pub fn settings(&self) -> VerificationSettings {
        self.settings
    }

    /// Generate, store and email a fresh code for `email`.
    ///
    /// Any code still pending for the same purpose is replaced. When the email
    /// cannot be delivered the freshly stored code is revoked again, so no
    /// valid-but-undelivered code is left behind.
    #[tracing::instrument(name = "VerificationCodeManager::issue_code", skip(self))]
    pub async fn issue_code(
        &self,
        email: &Email,
        purpose: CodePurpose,
    ) -> Result<IssuedCode, VerificationError> {
        let code = VerificationCode::generate()?;
        let issued_at = Utc::now();

        self.code_store
            .store_code(purpose, email, &code, self.settings.ttl)
            .await?;

        let ttl_minutes = self.settings.ttl.as_secs().div_ceil(60);
        let message = VerificationEmail::new(purpose, &code, ttl_minutes);

        if let Err(e) = self.email_client.send_email(email, &message).await
        {
            tracing::warn!(error = %e, "Verification email not delivered, revoking code");
            if let Err(revoke_error) = self.code_store.revoke_code(purpose, email, &code).await {
                tracing::error!(error = %revoke_error, "Failed to revoke undelivered code");
            }
            return Err(VerificationError::EmailDeliveryFailure(e));
        }

        tracing::info!("Verification code issued");

        Ok(IssuedCode {
            purpose,
            email: email.clone(),
            code,
            issued_at,
            ttl: self.settings.ttl,
        })
    }

    /// Check `presented` against the pending code and consume it on success.
    #[tracing::instrument(name = "VerificationCodeManager::verify_code", skip(self, presented))]
    pub async fn verify_code(
        &self,
        email: &Email,
        purpose: CodePurpose,
        presented: &VerificationCode,
    ) -> Result<(), VerificationError> {
        let check = self
            .code_store
            .consume_code(purpose, email, presented, self.settings.max_attempts)
            .await?;

        match check {
            CodeCheck::Matched => Ok(()),
            CodeCheck::Mismatched { remaining_attempts } => {
                tracing::info!(remaining_attempts, "Incorrect verification code");
                Err(VerificationError::IncorrectCode)
            }
            CodeCheck::Exhausted => {
                tracing::warn!("Verification attempts exhausted, code invalidated");
                Err(VerificationError::TooManyAttempts)
            }
            CodeCheck::Missing => Err(VerificationError::CodeExpiredOrUnknown),
        }
    }
}

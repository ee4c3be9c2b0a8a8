use chrono::Utc;
use codegate_core::{
    AccountStore, AccountStoreError, CodePurpose, Email, EmailClient, Role, TokenIssuer,
    TokenIssuerError, TokenPair, VerificationCode, VerificationCodeStore,
};

use crate::verification_code_manager::{VerificationCodeManager, VerificationError};

/// Error types for confirm registration use case
#[derive(Debug, thiserror::Error)]
pub enum ConfirmRegistrationError {
    #[error("Verification error: {0}")]
    VerificationError(#[from] VerificationError),
    #[error("Account store error: {0}")]
    AccountStoreError(#[from] AccountStoreError),
    #[error("Token issuer error: {0}")]
    TokenIssuerError(#[from] TokenIssuerError),
    #[error("Account is banned")]
    AccountBanned,
}

/// Confirm registration use case - consumes the emailed code, marks the
/// account confirmed and signs the first session tokens
pub struct ConfirmRegistrationUseCase<A, S, E, T>
where
    A: AccountStore,
    S: VerificationCodeStore,
    E: EmailClient,
    T: TokenIssuer,
{
    account_store: A,
    verification: VerificationCodeManager<S, E>,
    token_issuer: T,
}

impl<A, S, E, T> ConfirmRegistrationUseCase<A, S, E, T>
where
    A: AccountStore,
    S: VerificationCodeStore,
    E: EmailClient,
    T: TokenIssuer,
{
    pub fn new(
        account_store: A,
        verification: VerificationCodeManager<S, E>,
        token_issuer: T,
    ) -> Self {
        Self {
            account_store,
            verification,
            token_issuer,
        }
    }

    /// Execute the confirm registration use case
    ///
    /// # Arguments
    /// * `email` - Address the confirmation code was sent to
    /// * `code` - The code received via email
    ///
    /// # Returns
    /// Session tokens for the now confirmed account, or ConfirmRegistrationError.
    /// A banned account stays unconfirmed and gets no tokens.
    #[tracing::instrument(name = "ConfirmRegistrationUseCase::execute", skip(self, code))]
    pub async fn execute(
        &self,
        email: Email,
        code: VerificationCode,
    ) -> Result<TokenPair, ConfirmRegistrationError> {
        self.verification
            .verify_code(&email, CodePurpose::Register, &code)
            .await?;

        let mut account = self.account_store.get_account(&email).await?;
        if account.role == Role::Banned {
            return Err(ConfirmRegistrationError::AccountBanned);
        }

        let confirmed_at = Utc::now();
        self.account_store
            .confirm_account(&email, confirmed_at)
            .await?;
        account.is_confirmed = true;
        account.confirmed_at = Some(confirmed_at);

        Ok(self.token_issuer.issue(&account)?)
    }
}

use codegate_core::{
    AccountStore, AccountStoreError, CodePurpose, Email, EmailClient, IssuedCode,
    VerificationCodeStore,
};

use crate::verification_code_manager::{VerificationCodeManager, VerificationError};

/// Error types for resend confirmation use case
#[derive(Debug, thiserror::Error)]
pub enum ResendConfirmationError {
    #[error("Account store error: {0}")]
    AccountStoreError(#[from] AccountStoreError),
    #[error("Verification error: {0}")]
    VerificationError(#[from] VerificationError),
    #[error("Account is already confirmed")]
    AlreadyConfirmed,
}

/// Resend confirmation use case - replaces the pending registration code of an
/// unconfirmed account
pub struct ResendConfirmationUseCase<A, S, E>
where
    A: AccountStore,
    S: VerificationCodeStore,
    E: EmailClient,
{
    account_store: A,
    verification: VerificationCodeManager<S, E>,
}

impl<A, S, E> ResendConfirmationUseCase<A, S, E>
where
    A: AccountStore,
    S: VerificationCodeStore,
    E: EmailClient,
{
    pub fn new(account_store: A, verification: VerificationCodeManager<S, E>) -> Self {
        Self {
            account_store,
            verification,
        }
    }

    #[tracing::instrument(name = "ResendConfirmationUseCase::execute", skip(self))]
    pub async fn execute(&self, email: Email) -> Result<IssuedCode, ResendConfirmationError> {
        let account = self.account_store.get_account(&email).await?;
        if account.is_confirmed {
            return Err(ResendConfirmationError::AlreadyConfirmed);
        }

        Ok(self
            .verification
            .issue_code(&email, CodePurpose::Register)
            .await?)
    }
}

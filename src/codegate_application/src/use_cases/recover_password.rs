use codegate_core::{
    AccountStore, AccountStoreError, CodePurpose, Email, EmailClient, Password, VerificationCode,
    VerificationCodeStore,
};

use crate::verification_code_manager::{VerificationCodeManager, VerificationError};

/// Error types for recover password use case
#[derive(Debug, thiserror::Error)]
pub enum RecoverPasswordError {
    #[error("Verification error: {0}")]
    VerificationError(#[from] VerificationError),
    #[error("Account store error: {0}")]
    AccountStoreError(#[from] AccountStoreError),
}

/// Recover password use case - consumes the recovery code and sets a new password
pub struct RecoverPasswordUseCase<A, S, E>
where
    A: AccountStore,
    S: VerificationCodeStore,
    E: EmailClient,
{
    account_store: A,
    verification: VerificationCodeManager<S, E>,
}

impl<A, S, E> RecoverPasswordUseCase<A, S, E>
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

    /// Execute the recover password use case
    ///
    /// # Arguments
    /// * `email` - Address the recovery code was sent to
    /// * `code` - The code received via email
    /// * `new_password` - The password to set
    #[tracing::instrument(
        name = "RecoverPasswordUseCase::execute",
        skip(self, code, new_password)
    )]
    pub async fn execute(
        &self,
        email: Email,
        code: VerificationCode,
        new_password: Password,
    ) -> Result<(), RecoverPasswordError> {
        self.verification
            .verify_code(&email, CodePurpose::Recover, &code)
            .await?;

        self.account_store
            .set_new_password(&email, new_password)
            .await?;

        Ok(())
    }
}

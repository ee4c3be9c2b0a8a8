use codegate_core::{
    AccountStore, AccountStoreError, CodePurpose, Email, EmailClient, IssuedCode,
    VerificationCodeStore,
};

use crate::verification_code_manager::{VerificationCodeManager, VerificationError};

/// Error types for forgot password use case
#[derive(Debug, thiserror::Error)]
pub enum ForgotPasswordError {
    #[error("Account store error: {0}")]
    AccountStoreError(#[from] AccountStoreError),
    #[error("Verification error: {0}")]
    VerificationError(#[from] VerificationError),
}

/// Forgot password use case - emails a recovery code to an existing account
pub struct ForgotPasswordUseCase<A, S, E>
where
    A: AccountStore,
    S: VerificationCodeStore,
    E: EmailClient,
{
    account_store: A,
    verification: VerificationCodeManager<S, E>,
}

impl<A, S, E> ForgotPasswordUseCase<A, S, E>
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

    /// Execute the forgot password use case
    ///
    /// # Arguments
    /// * `email` - Address of the account to recover
    ///
    /// # Returns
    /// The issued recovery code, or ForgotPasswordError if the account is unknown
    #[tracing::instrument(name = "ForgotPasswordUseCase::execute", skip(self))]
    pub async fn execute(&self, email: Email) -> Result<IssuedCode, ForgotPasswordError> {
        if !self.account_store.email_exists(&email).await? {
            return Err(AccountStoreError::AccountNotFound.into());
        }

        Ok(self
            .verification
            .issue_code(&email, CodePurpose::Recover)
            .await?)
    }
}

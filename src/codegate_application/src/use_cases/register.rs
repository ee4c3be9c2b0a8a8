use codegate_core::{
    AccountStore, AccountStoreError, CodePurpose, Email, EmailClient, IssuedCode, NewAccount,
    Password, VerificationCodeStore,
};

use crate::verification_code_manager::{VerificationCodeManager, VerificationError};

/// Error types for register use case
#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("Account store error: {0}")]
    AccountStoreError(#[from] AccountStoreError),
    #[error("Verification error: {0}")]
    VerificationError(#[from] VerificationError),
}

/// Register use case - creates an unconfirmed account and emails a confirmation code
pub struct RegisterUseCase<A, S, E>
where
    A: AccountStore,
    S: VerificationCodeStore,
    E: EmailClient,
{
    account_store: A,
    verification: VerificationCodeManager<S, E>,
}

impl<A, S, E> RegisterUseCase<A, S, E>
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

    /// Execute the register use case
    ///
    /// # Arguments
    /// * `email` - Validated email address
    /// * `password` - Password satisfying the password policy
    ///
    /// # Returns
    /// The issued confirmation code on success, or RegisterError
    #[tracing::instrument(name = "RegisterUseCase::execute", skip(self, password))]
    pub async fn execute(
        &self,
        email: Email,
        password: Password,
    ) -> Result<IssuedCode, RegisterError> {
        if self.account_store.email_exists(&email).await? {
            return Err(AccountStoreError::AccountAlreadyExists.into());
        }

        self.account_store
            .add_account(NewAccount::user(email.clone(), password))
            .await?;

        let issued = self
            .verification
            .issue_code(&email, CodePurpose::Register)
            .await?;

        Ok(issued)
    }
}

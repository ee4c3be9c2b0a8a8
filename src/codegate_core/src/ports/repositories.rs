use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{
    account::{Account, NewAccount, Role},
    email::Email,
    password::Password,
    verification_code::{CodePurpose, VerificationCode},
};

// VerificationCodeStore port trait and errors
#[derive(Debug, Error)]
pub enum CodeStoreError {
    #[error("Code store unavailable: {0}")]
    Unavailable(String),
}

/// A code that is still waiting to be verified.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingCode {
    pub code: VerificationCode,
    pub failed_attempts: u32,
}

/// Outcome of an atomic check-and-delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeCheck {
    /// The presented code matched; the pending code has been deleted.
    Matched,
    /// Wrong code; the pending code is kept and its attempt counter bumped.
    Mismatched { remaining_attempts: u32 },
    /// Wrong code and no attempts left; the pending code has been deleted.
    Exhausted,
    /// Nothing pending: expired, consumed, or never issued.
    Missing,
}

/// An expiring key-value store holding at most one pending code per
/// `(purpose, email)`.
///
/// Transport failures are reported as [`CodeStoreError::Unavailable`] and must
/// never be folded into the "nothing pending" answers.
#[async_trait]
pub trait VerificationCodeStore: Send + Sync {
    /// Store `code` for `ttl`, replacing any pending code and its attempt counter.
    async fn store_code(
        &self,
        purpose: CodePurpose,
        email: &Email,
        code: &VerificationCode,
        ttl: Duration,
    ) -> Result<(), CodeStoreError>;

    async fn get_code(
        &self,
        purpose: CodePurpose,
        email: &Email,
    ) -> Result<Option<PendingCode>, CodeStoreError>;

    /// Delete the pending code only if it still equals `code`.
    ///
    /// Returns whether anything was deleted.
    async fn revoke_code(
        &self,
        purpose: CodePurpose,
        email: &Email,
        code: &VerificationCode,
    ) -> Result<bool, CodeStoreError>;

    /// Compare `presented` with the pending code and delete it on a match,
    /// as a single atomic operation.
    async fn consume_code(
        &self,
        purpose: CodePurpose,
        email: &Email,
        presented: &VerificationCode,
        max_attempts: u32,
    ) -> Result<CodeCheck, CodeStoreError>;
}

// AccountStore port trait and errors
#[derive(Debug, Error)]
pub enum AccountStoreError {
    #[error("Account already exists")]
    AccountAlreadyExists,
    #[error("Account not found")]
    AccountNotFound,
    #[error("Incorrect password")]
    IncorrectPassword,
    #[error("Account role does not allow this change")]
    RoleConflict,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for AccountStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::AccountAlreadyExists, Self::AccountAlreadyExists)
                | (Self::AccountNotFound, Self::AccountNotFound)
                | (Self::IncorrectPassword, Self::IncorrectPassword)
                | (Self::RoleConflict, Self::RoleConflict)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn add_account(&self, account: NewAccount) -> Result<(), AccountStoreError>;
    async fn get_account(&self, email: &Email) -> Result<Account, AccountStoreError>;
    async fn get_account_by_id(&self, id: Uuid) -> Result<Account, AccountStoreError>;
    async fn email_exists(&self, email: &Email) -> Result<bool, AccountStoreError>;
    async fn authenticate(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<Account, AccountStoreError>;
    async fn confirm_account(
        &self,
        email: &Email,
        confirmed_at: DateTime<Utc>,
    ) -> Result<(), AccountStoreError>;
    async fn set_new_password(
        &self,
        email: &Email,
        new_password: Password,
    ) -> Result<(), AccountStoreError>;

    /// Set the role of account `id` and return the updated account.
    ///
    /// With `only_from` set, the change applies only while the account still
    /// holds that role; otherwise it fails with [`AccountStoreError::RoleConflict`].
    async fn set_role(
        &self,
        id: Uuid,
        role: Role,
        only_from: Option<Role>,
    ) -> Result<Account, AccountStoreError>;
}

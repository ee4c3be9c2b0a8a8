use codegate_core::{Account, AccountLookup, AccountStore, AccountStoreError};
use uuid::Uuid;

use super::account_access::{AdminAccessError, find_account, require_admin};

/// Error types for get profile use case
#[derive(Debug, thiserror::Error)]
pub enum GetProfileError {
    #[error("{0}")]
    AdminAccess(#[from] AdminAccessError),
    #[error("Account store error: {0}")]
    AccountStoreError(#[from] AccountStoreError),
}

/// Get profile use case - reads the caller's own account, or any account
/// when the caller is an administrator
pub struct GetProfileUseCase<A>
where
    A: AccountStore,
{
    account_store: A,
}

impl<A> GetProfileUseCase<A>
where
    A: AccountStore,
{
    pub fn new(account_store: A) -> Self {
        Self { account_store }
    }

    #[tracing::instrument(name = "GetProfileUseCase::execute", skip(self))]
    pub async fn execute(&self, account_id: Uuid) -> Result<Account, GetProfileError> {
        Ok(self.account_store.get_account_by_id(account_id).await?)
    }

    #[tracing::instrument(name = "GetProfileUseCase::execute_as_admin", skip(self))]
    pub async fn execute_as_admin(
        &self,
        actor_id: Uuid,
        target: AccountLookup,
    ) -> Result<Account, GetProfileError> {
        require_admin(&self.account_store, actor_id).await?;

        Ok(find_account(&self.account_store, &target).await?)
    }
}

use codegate_core::{Account, AccountLookup, AccountStore, AccountStoreError, Role};
use uuid::Uuid;

use super::account_access::{AdminAccessError, find_account, require_admin};

/// Error types for unban account use case
#[derive(Debug, thiserror::Error)]
pub enum UnbanAccountError {
    #[error("{0}")]
    AdminAccess(#[from] AdminAccessError),
    #[error("Account store error: {0}")]
    AccountStoreError(#[from] AccountStoreError),
}

/// Unban account use case - restores a banned account to a regular user
pub struct UnbanAccountUseCase<A>
where
    A: AccountStore,
{
    account_store: A,
}

impl<A> UnbanAccountUseCase<A>
where
    A: AccountStore,
{
    pub fn new(account_store: A) -> Self {
        Self { account_store }
    }

    #[tracing::instrument(name = "UnbanAccountUseCase::execute", skip(self))]
    pub async fn execute(
        &self,
        actor_id: Uuid,
        target: AccountLookup,
    ) -> Result<Account, UnbanAccountError> {
        require_admin(&self.account_store, actor_id).await?;

        let account = find_account(&self.account_store, &target).await?;
        let restored = self
            .account_store
            .set_role(account.id, Role::User, Some(Role::Banned))
            .await?;

        tracing::info!(account_id = %restored.id, "Account unbanned");
        Ok(restored)
    }
}

use codegate_core::{Account, AccountLookup, AccountStore, AccountStoreError, Role};
use uuid::Uuid;

use super::account_access::{AdminAccessError, find_account, require_admin};

/// Error types for change role use case
#[derive(Debug, thiserror::Error)]
pub enum ChangeRoleError {
    #[error("{0}")]
    AdminAccess(#[from] AdminAccessError),
    #[error("Account store error: {0}")]
    AccountStoreError(#[from] AccountStoreError),
}

/// Change role use case - an administrator assigns any role to an account
pub struct ChangeRoleUseCase<A>
where
    A: AccountStore,
{
    account_store: A,
}

impl<A> ChangeRoleUseCase<A>
where
    A: AccountStore,
{
    pub fn new(account_store: A) -> Self {
        Self { account_store }
    }

    #[tracing::instrument(name = "ChangeRoleUseCase::execute", skip(self))]
    pub async fn execute(
        &self,
        actor_id: Uuid,
        target: AccountLookup,
        role: Role,
    ) -> Result<Account, ChangeRoleError> {
        require_admin(&self.account_store, actor_id).await?;

        let account = find_account(&self.account_store, &target).await?;
        let updated = self.account_store.set_role(account.id, role, None).await?;

        tracing::info!(account_id = %updated.id, role = %updated.role, "Account role changed");
        Ok(updated)
    }
}

use codegate_core::{Account, AccountLookup, AccountStore, AccountStoreError, Role};
use uuid::Uuid;

use super::account_access::{AdminAccessError, find_account, require_admin};

/// Error types for ban account use case
#[derive(Debug, thiserror::Error)]
pub enum BanAccountError {
    #[error("{0}")]
    AdminAccess(#[from] AdminAccessError),
    #[error("Account store error: {0}")]
    AccountStoreError(#[from] AccountStoreError),
}

/// Ban account use case - an administrator bans a regular user
pub struct BanAccountUseCase<A>
where
    A: AccountStore,
{
    account_store: A,
}

impl<A> BanAccountUseCase<A>
where
    A: AccountStore,
{
    pub fn new(account_store: A) -> Self {
        Self { account_store }
    }

    /// Only accounts holding [`Role::User`] can be banned. Any other role
    /// yields `AccountStoreError::RoleConflict`.
    #[tracing::instrument(name = "BanAccountUseCase::execute", skip(self))]
    pub async fn execute(
        &self,
        actor_id: Uuid,
        target: AccountLookup,
    ) -> Result<Account, BanAccountError> {
        require_admin(&self.account_store, actor_id).await?;

        let account = find_account(&self.account_store, &target).await?;
        let banned = self
            .account_store
            .set_role(account.id, Role::Banned, Some(Role::User))
            .await?;

        tracing::info!(account_id = %banned.id, "Account banned");
        Ok(banned)
    }
}

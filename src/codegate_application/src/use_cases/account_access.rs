use codegate_core::{Account, AccountLookup, AccountStore, AccountStoreError, Role};
use uuid::Uuid;

/// Error types shared by the administration use cases
#[derive(Debug, thiserror::Error)]
pub enum AdminAccessError {
    #[error("Administrator role required")]
    NotAdmin,
    #[error("Account store error: {0}")]
    AccountStoreError(#[from] AccountStoreError),
}

/// Check the acting account's current role in the store, not the one baked
/// into its token, so a demoted administrator loses access at once.
pub(crate) async fn require_admin<A: AccountStore>(
    account_store: &A,
    actor_id: Uuid,
) -> Result<(), AdminAccessError> {
    match account_store.get_account_by_id(actor_id).await {
        Ok(actor) if actor.role == Role::Admin => Ok(()),
        Ok(_) | Err(AccountStoreError::AccountNotFound) => Err(AdminAccessError::NotAdmin),
        Err(e) => Err(e.into()),
    }
}

pub(crate) async fn find_account<A: AccountStore>(
    account_store: &A,
    lookup: &AccountLookup,
) -> Result<Account, AccountStoreError> {
    match lookup {
        AccountLookup::Id(id) => account_store.get_account_by_id(*id).await,
        AccountLookup::Email(email) => account_store.get_account(email).await,
    }
}

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use codegate_core::{
    Account, AccountStore, AccountStoreError, Email, NewAccount, Password, Role,
};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Clone)]
struct StoredAccount {
    account: Account,
    password: Password,
}

#[derive(Default, Clone)]
pub struct HashMapAccountStore {
    accounts: Arc<RwLock<HashMap<Email, StoredAccount>>>,
}

impl HashMapAccountStore {
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait::async_trait]
impl AccountStore for HashMapAccountStore {
    async fn add_account(&self, new_account: NewAccount) -> Result<(), AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&new_account.email) {
            return Err(AccountStoreError::AccountAlreadyExists);
        }

        let account = Account {
            id: new_account.id,
            email: new_account.email.clone(),
            role: new_account.role,
            is_confirmed: false,
            confirmed_at: None,
        };
        accounts.insert(
            new_account.email,
            StoredAccount {
                account,
                password: new_account.password,
            },
        );
        Ok(())
    }

    async fn get_account(&self, email: &Email) -> Result<Account, AccountStoreError> {
        let accounts = self.accounts.read().await;
        accounts
            .get(email)
            .map(|stored| stored.account.clone())
            .ok_or(AccountStoreError::AccountNotFound)
    }

    async fn get_account_by_id(&self, id: Uuid) -> Result<Account, AccountStoreError> {
        let accounts = self.accounts.read().await;
        accounts
            .values()
            .find(|stored| stored.account.id == id)
            .map(|stored| stored.account.clone())
            .ok_or(AccountStoreError::AccountNotFound)
    }

    async fn email_exists(&self, email: &Email) -> Result<bool, AccountStoreError> {
        Ok(self.accounts.read().await.contains_key(email))
    }

    async fn authenticate(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<Account, AccountStoreError> {
        let accounts = self.accounts.read().await;
        let stored = accounts
            .get(email)
            .ok_or(AccountStoreError::AccountNotFound)?;

        if &stored.password != password {
            return Err(AccountStoreError::IncorrectPassword);
        }

        Ok(stored.account.clone())
    }

    async fn confirm_account(
        &self,
        email: &Email,
        confirmed_at: DateTime<Utc>,
    ) -> Result<(), AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        let stored = accounts
            .get_mut(email)
            .ok_or(AccountStoreError::AccountNotFound)?;

        stored.account.is_confirmed = true;
        stored.account.confirmed_at = Some(confirmed_at);
        Ok(())
    }

    async fn set_new_password(
        &self,
        email: &Email,
        new_password: Password,
    ) -> Result<(), AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        let stored = accounts
            .get_mut(email)
            .ok_or(AccountStoreError::AccountNotFound)?;

        stored.password = new_password;
        Ok(())
    }

    async fn set_role(
        &self,
        id: Uuid,
        role: Role,
        only_from: Option<Role>,
    ) -> Result<Account, AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        let stored = accounts
            .values_mut()
            .find(|stored| stored.account.id == id)
            .ok_or(AccountStoreError::AccountNotFound)?;

        if only_from.is_some_and(|expected| stored.account.role != expected) {
            return Err(AccountStoreError::RoleConflict);
        }
        stored.account.role = role;
        Ok(stored.account.clone())
    }
}

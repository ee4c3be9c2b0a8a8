//! In-memory doubles shared by the use case tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use codegate_core::{
    Account, AccountStore, AccountStoreError, CodeCheck, CodePurpose, CodeStoreError, Email,
    EmailClient, NewAccount, Password, PendingCode, Role, Session, TokenIssuer,
    TokenIssuerError, TokenPair, VerificationCode, VerificationCodeStore, VerificationEmail,
};
use secrecy::{ExposeSecret, Secret};
use tokio::sync::RwLock;
use uuid::Uuid;

pub fn email(raw: &str) -> Email {
    Email::try_from(Secret::new(raw.to_string())).unwrap()
}

pub fn password(raw: &str) -> Password {
    Password::try_from(Secret::new(raw.to_string())).unwrap()
}

#[derive(Clone, Default)]
pub struct MockCodeStore {
    codes: Arc<RwLock<HashMap<(CodePurpose, Email), PendingCode>>>,
    unavailable: bool,
}

impl MockCodeStore {
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    fn check_available(&self) -> Result<(), CodeStoreError> {
        if self.unavailable {
            return Err(CodeStoreError::Unavailable("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl VerificationCodeStore for MockCodeStore {
    async fn store_code(
        &self,
        purpose: CodePurpose,
        email: &Email,
        code: &VerificationCode,
        _ttl: Duration,
    ) -> Result<(), CodeStoreError> {
        self.check_available()?;
        self.codes.write().await.insert(
            (purpose, email.clone()),
            PendingCode {
                code: code.clone(),
                failed_attempts: 0,
            },
        );
        Ok(())
    }

    async fn get_code(
        &self,
        purpose: CodePurpose,
        email: &Email,
    ) -> Result<Option<PendingCode>, CodeStoreError> {
        self.check_available()?;
        Ok(self
            .codes
            .read()
            .await
            .get(&(purpose, email.clone()))
            .cloned())
    }

    async fn revoke_code(
        &self,
        purpose: CodePurpose,
        email: &Email,
        code: &VerificationCode,
    ) -> Result<bool, CodeStoreError> {
        self.check_available()?;
        let mut codes = self.codes.write().await;
        let key = (purpose, email.clone());
        if codes.get(&key).is_some_and(|pending| &pending.code == code) {
            codes.remove(&key);
            return Ok(true);
        }
        Ok(false)
    }

    async fn consume_code(
        &self,
        purpose: CodePurpose,
        email: &Email,
        presented: &VerificationCode,
        max_attempts: u32,
    ) -> Result<CodeCheck, CodeStoreError> {
        self.check_available()?;
        let mut codes = self.codes.write().await;
        let key = (purpose, email.clone());
        let Some(pending) = codes.get_mut(&key) else {
            return Ok(CodeCheck::Missing);
        };

        if &pending.code == presented {
            codes.remove(&key);
            return Ok(CodeCheck::Matched);
        }

        pending.failed_attempts += 1;
        if pending.failed_attempts >= max_attempts {
            codes.remove(&key);
            return Ok(CodeCheck::Exhausted);
        }
        Ok(CodeCheck::Mismatched {
            remaining_attempts: max_attempts - pending.failed_attempts,
        })
    }
}

#[derive(Debug, Clone)]
pub struct SentEmail {
    pub recipient: Email,
    pub purpose: CodePurpose,
    pub subject: String,
    pub content: String,
}

impl SentEmail {
    /// The six digit code embedded in the message body.
    pub fn code(&self) -> VerificationCode {
        let start = self
            .content
            .find("code is: ")
            .map(|i| i + "code is: ".len())
            .unwrap();
        VerificationCode::parse(&self.content[start..start + 6]).unwrap()
    }
}

#[derive(Clone, Default)]
pub struct RecordingEmailClient {
    sent: Arc<RwLock<Vec<SentEmail>>>,
    failing: bool,
}

impl RecordingEmailClient {
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub async fn sent(&self) -> Vec<SentEmail> {
        self.sent.read().await.clone()
    }

    pub async fn last_code(&self) -> VerificationCode {
        self.sent.read().await.last().unwrap().code()
    }
}

#[async_trait::async_trait]
impl EmailClient for RecordingEmailClient {
    async fn send_email(
        &self,
        recipient: &Email,
        message: &VerificationEmail,
    ) -> Result<(), String> {
        if self.failing {
            return Err("smtp relay rejected the message".to_string());
        }
        self.sent.write().await.push(SentEmail {
            recipient: recipient.clone(),
            purpose: message.purpose,
            subject: message.subject.to_string(),
            content: message.body.clone(),
        });
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MockAccountStore {
    accounts: Arc<RwLock<HashMap<Email, (Account, Password)>>>,
}

impl MockAccountStore {
    pub async fn insert(&self, account: Account, password: Password) {
        self.accounts
            .write()
            .await
            .insert(account.email.clone(), (account, password));
    }

    /// Insert a confirmed account with `role` and return its id.
    pub async fn seed(&self, address: &str, role: Role) -> Uuid {
        let id = Uuid::new_v4();
        self.insert(
            Account {
                id,
                email: email(address),
                role,
                is_confirmed: true,
                confirmed_at: Some(Utc::now()),
            },
            password("Passw0rd!"),
        )
        .await;
        id
    }

    pub async fn password_of(&self, email: &Email) -> Option<String> {
        self.accounts
            .read()
            .await
            .get(email)
            .map(|(_, password)| password.as_ref().expose_secret().clone())
    }
}

#[async_trait::async_trait]
impl AccountStore for MockAccountStore {
    async fn add_account(&self, account: NewAccount) -> Result<(), AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&account.email) {
            return Err(AccountStoreError::AccountAlreadyExists);
        }
        let stored = Account {
            id: account.id,
            email: account.email.clone(),
            role: account.role,
            is_confirmed: false,
            confirmed_at: None,
        };
        accounts.insert(account.email, (stored, account.password));
        Ok(())
    }

    async fn get_account(&self, email: &Email) -> Result<Account, AccountStoreError> {
        self.accounts
            .read()
            .await
            .get(email)
            .map(|(account, _)| account.clone())
            .ok_or(AccountStoreError::AccountNotFound)
    }

    async fn get_account_by_id(&self, id: Uuid) -> Result<Account, AccountStoreError> {
        self.accounts
            .read()
            .await
            .values()
            .find(|(account, _)| account.id == id)
            .map(|(account, _)| account.clone())
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
        let (account, stored) = accounts
            .get(email)
            .ok_or(AccountStoreError::AccountNotFound)?;
        if stored != password {
            return Err(AccountStoreError::IncorrectPassword);
        }
        Ok(account.clone())
    }

    async fn confirm_account(
        &self,
        email: &Email,
        confirmed_at: DateTime<Utc>,
    ) -> Result<(), AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        let (account, _) = accounts
            .get_mut(email)
            .ok_or(AccountStoreError::AccountNotFound)?;
        account.is_confirmed = true;
        account.confirmed_at = Some(confirmed_at);
        Ok(())
    }

    async fn set_new_password(
        &self,
        email: &Email,
        new_password: Password,
    ) -> Result<(), AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        let (_, password) = accounts
            .get_mut(email)
            .ok_or(AccountStoreError::AccountNotFound)?;
        *password = new_password;
        Ok(())
    }

    async fn set_role(
        &self,
        id: Uuid,
        role: Role,
        only_from: Option<Role>,
    ) -> Result<Account, AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        let (account, _) = accounts
            .values_mut()
            .find(|(account, _)| account.id == id)
            .ok_or(AccountStoreError::AccountNotFound)?;
        if only_from.is_some_and(|expected| expected != account.role) {
            return Err(AccountStoreError::RoleConflict);
        }
        account.role = role;
        Ok(account.clone())
    }
}

#[derive(Clone, Default)]
pub struct MockTokenIssuer;

impl TokenIssuer for MockTokenIssuer {
    fn issue(&self, account: &Account) -> Result<TokenPair, TokenIssuerError> {
        Ok(TokenPair {
            access_token: format!("access-{}", account.id),
            refresh_token: format!("refresh-{}", account.id),
        })
    }

    fn validate_access(&self, token: &str) -> Result<Session, TokenIssuerError> {
        let account_id = token
            .strip_prefix("access-")
            .and_then(|id| id.parse().ok())
            .ok_or_else(|| TokenIssuerError::InvalidToken(token.to_string()))?;
        Ok(Session {
            account_id,
            role: Role::User,
        })
    }
}

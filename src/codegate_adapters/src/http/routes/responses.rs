use chrono::{DateTime, Utc};
use codegate_core::{Account, IssuedCode, Role};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body returned whenever a verification code has been emailed.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeSentResponse {
    pub message: String,
    pub expires_at: DateTime<Utc>,
}

impl CodeSentResponse {
    pub fn new(message: impl Into<String>, issued: &IssuedCode) -> Self {
        Self {
            message: message.into(),
            expires_at: issued.expires_at(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Public view of an account.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
    pub is_confirmed: bool,
    pub confirmed_at: Option<DateTime<Utc>>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            email: account.email.as_ref().expose_secret().clone(),
            role: account.role,
            is_confirmed: account.is_confirmed,
            confirmed_at: account.confirmed_at,
        }
    }
}

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    account::Account,
    email::Email,
    token::{Session, TokenPair},
    verification_email::VerificationEmail,
};

/// Port trait for email sending service
#[async_trait]
pub trait EmailClient: Send + Sync {
    async fn send_email(
        &self,
        recipient: &Email,
        message: &VerificationEmail,
    ) -> Result<(), String>;
}

#[derive(Debug, Error)]
pub enum TokenIssuerError {
    #[error("Failed to sign token: {0}")]
    Signing(String),
    #[error("Invalid token: {0}")]
    InvalidToken(String),
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

/// Port trait for the session token signer
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, account: &Account) -> Result<TokenPair, TokenIssuerError>;

    /// Check an access token's signature, expiry and type.
    fn validate_access(&self, token: &str) -> Result<Session, TokenIssuerError>;
}

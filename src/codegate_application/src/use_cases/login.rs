use codegate_core::{
    AccountStore, AccountStoreError, Email, Password, Role, TokenIssuer, TokenIssuerError,
    TokenPair,
};

/// Error types specific to login use case
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("Account store error: {0}")]
    AccountStoreError(#[from] AccountStoreError),
    #[error("Token issuer error: {0}")]
    TokenIssuerError(#[from] TokenIssuerError),
    #[error("Your account is not confirmed. Please check your email for a confirmation code.")]
    AccountNotConfirmed,
    #[error("Account is banned")]
    AccountBanned,
}

/// Login use case - authenticates a confirmed account and signs session tokens
pub struct LoginUseCase<A, T>
where
    A: AccountStore,
    T: TokenIssuer,
{
    account_store: A,
    token_issuer: T,
}

impl<A, T> LoginUseCase<A, T>
where
    A: AccountStore,
    T: TokenIssuer,
{
    pub fn new(account_store: A, token_issuer: T) -> Self {
        Self {
            account_store,
            token_issuer,
        }
    }

    /// Execute the login use case
    ///
    /// # Arguments
    /// * `email` - User's email address
    /// * `password` - User's password
    ///
    /// # Returns
    /// Session tokens, or LoginError when credentials are wrong or the account
    /// is unconfirmed or banned
    #[tracing::instrument(name = "LoginUseCase::execute", skip(self, password))]
    pub async fn execute(&self, email: Email, password: Password) -> Result<TokenPair, LoginError> {
        let account = self.account_store.authenticate(&email, &password).await?;

        if account.role == Role::Banned {
            return Err(LoginError::AccountBanned);
        }
        if !account.is_confirmed {
            return Err(LoginError::AccountNotConfirmed);
        }

        Ok(self.token_issuer.issue(&account)?)
    }
}

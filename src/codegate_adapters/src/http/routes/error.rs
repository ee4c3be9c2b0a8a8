use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use codegate_application::{
    AdminAccessError, BanAccountError, ChangeRoleError, ConfirmRegistrationError,
    ForgotPasswordError, GetProfileError, LoginError, RecoverPasswordError, RegisterError,
    ResendConfirmationError, UnbanAccountError, VerificationError,
};
use codegate_core::{
    AccountStoreError, CodeError, EmailError, PasswordError, RoleError, TokenIssuerError,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum AuthApiError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    #[error("Incorrect verification code")]
    IncorrectCode,

    #[error("Missing bearer token")]
    MissingToken,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Administrator role required")]
    Forbidden,

    #[error("Your account is not confirmed. Please check your email for a confirmation code.")]
    AccountNotConfirmed,

    #[error("Account is banned")]
    AccountBanned,

    #[error("Account not found")]
    AccountNotFound,

    #[error("Verification code expired or email not found")]
    CodeExpiredOrUnknown,

    #[error("Account already exists")]
    AccountAlreadyExists,

    #[error("Account is already confirmed")]
    AlreadyConfirmed,

    #[error("Account role does not allow this change")]
    RoleConflict,

    #[error("Too many incorrect attempts, request a new code")]
    TooManyAttempts,

    #[error("Service temporarily unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl IntoResponse for AuthApiError {
    fn into_response(self) -> Response {
        let status_code = match &self {
            AuthApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,

            AuthApiError::AuthenticationError(_)
            | AuthApiError::IncorrectCode
            | AuthApiError::MissingToken
            | AuthApiError::InvalidToken => StatusCode::UNAUTHORIZED,

            AuthApiError::AccountNotConfirmed
            | AuthApiError::AccountBanned
            | AuthApiError::Forbidden => StatusCode::FORBIDDEN,

            AuthApiError::AccountNotFound | AuthApiError::CodeExpiredOrUnknown => {
                StatusCode::NOT_FOUND
            }

            AuthApiError::AccountAlreadyExists
            | AuthApiError::AlreadyConfirmed
            | AuthApiError::RoleConflict => StatusCode::CONFLICT,

            AuthApiError::TooManyAttempts => StatusCode::TOO_MANY_REQUESTS,

            AuthApiError::ServiceUnavailable(detail) => {
                tracing::error!(error = %detail, "Verification store unavailable");
                StatusCode::SERVICE_UNAVAILABLE
            }

            AuthApiError::UnexpectedError(detail) => {
                tracing::error!(error = %detail, "Request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        // Backend details stay in the logs.
        let error = match self {
            AuthApiError::ServiceUnavailable(_) => "Service temporarily unavailable".to_string(),
            AuthApiError::UnexpectedError(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };

        (status_code, Json(ErrorResponse { error })).into_response()
    }
}

impl From<EmailError> for AuthApiError {
    fn from(error: EmailError) -> Self {
        AuthApiError::InvalidInput(error.to_string())
    }
}

impl From<PasswordError> for AuthApiError {
    fn from(error: PasswordError) -> Self {
        AuthApiError::InvalidInput(error.to_string())
    }
}

impl From<RoleError> for AuthApiError {
    fn from(error: RoleError) -> Self {
        AuthApiError::InvalidInput(error.to_string())
    }
}

impl From<CodeError> for AuthApiError {
    fn from(error: CodeError) -> Self {
        match error {
            CodeError::Malformed => AuthApiError::InvalidInput(error.to_string()),
            CodeError::RandomnessFailure(e) => AuthApiError::UnexpectedError(e),
        }
    }
}

impl From<AccountStoreError> for AuthApiError {
    fn from(error: AccountStoreError) -> Self {
        match error {
            AccountStoreError::AccountAlreadyExists => AuthApiError::AccountAlreadyExists,
            AccountStoreError::AccountNotFound => AuthApiError::AccountNotFound,
            AccountStoreError::IncorrectPassword => {
                AuthApiError::AuthenticationError(error.to_string())
            }
            AccountStoreError::RoleConflict => AuthApiError::RoleConflict,
            AccountStoreError::UnexpectedError(e) => AuthApiError::UnexpectedError(e),
        }
    }
}

impl From<TokenIssuerError> for AuthApiError {
    fn from(error: TokenIssuerError) -> Self {
        match error {
            TokenIssuerError::InvalidToken(_) => AuthApiError::InvalidToken,
            TokenIssuerError::Signing(_) | TokenIssuerError::UnexpectedError(_) => {
                AuthApiError::UnexpectedError(error.to_string())
            }
        }
    }
}

impl From<VerificationError> for AuthApiError {
    fn from(error: VerificationError) -> Self {
        match error {
            VerificationError::CodeExpiredOrUnknown => AuthApiError::CodeExpiredOrUnknown,
            VerificationError::IncorrectCode => AuthApiError::IncorrectCode,
            VerificationError::TooManyAttempts => AuthApiError::TooManyAttempts,
            VerificationError::StoreUnavailable(e) => AuthApiError::ServiceUnavailable(e),
            VerificationError::RandomnessFailure(_) | VerificationError::EmailDeliveryFailure(_) => {
                AuthApiError::UnexpectedError(error.to_string())
            }
        }
    }
}

impl From<RegisterError> for AuthApiError {
    fn from(error: RegisterError) -> Self {
        match error {
            RegisterError::AccountStoreError(e) => e.into(),
            RegisterError::VerificationError(e) => e.into(),
        }
    }
}

impl From<ConfirmRegistrationError> for AuthApiError {
    fn from(error: ConfirmRegistrationError) -> Self {
        match error {
            ConfirmRegistrationError::VerificationError(e) => e.into(),
            ConfirmRegistrationError::AccountStoreError(e) => e.into(),
            ConfirmRegistrationError::TokenIssuerError(e) => e.into(),
            ConfirmRegistrationError::AccountBanned => AuthApiError::AccountBanned,
        }
    }
}

impl From<ResendConfirmationError> for AuthApiError {
    fn from(error: ResendConfirmationError) -> Self {
        match error {
            ResendConfirmationError::AccountStoreError(e) => e.into(),
            ResendConfirmationError::VerificationError(e) => e.into(),
            ResendConfirmationError::AlreadyConfirmed => AuthApiError::AlreadyConfirmed,
        }
    }
}

impl From<ForgotPasswordError> for AuthApiError {
    fn from(error: ForgotPasswordError) -> Self {
        match error {
            ForgotPasswordError::AccountStoreError(e) => e.into(),
            ForgotPasswordError::VerificationError(e) => e.into(),
        }
    }
}

impl From<RecoverPasswordError> for AuthApiError {
    fn from(error: RecoverPasswordError) -> Self {
        match error {
            RecoverPasswordError::VerificationError(e) => e.into(),
            RecoverPasswordError::AccountStoreError(e) => e.into(),
        }
    }
}

impl From<LoginError> for AuthApiError {
    fn from(error: LoginError) -> Self {
        match error {
            LoginError::AccountStoreError(AccountStoreError::AccountNotFound) => {
                AuthApiError::AuthenticationError("Incorrect credentials".to_string())
            }
            LoginError::AccountStoreError(e) => e.into(),
            LoginError::TokenIssuerError(e) => e.into(),
            LoginError::AccountNotConfirmed => AuthApiError::AccountNotConfirmed,
            LoginError::AccountBanned => AuthApiError::AccountBanned,
        }
    }
}

impl From<AdminAccessError> for AuthApiError {
    fn from(error: AdminAccessError) -> Self {
        match error {
            AdminAccessError::NotAdmin => AuthApiError::Forbidden,
            AdminAccessError::AccountStoreError(e) => e.into(),
        }
    }
}

impl From<BanAccountError> for AuthApiError {
    fn from(error: BanAccountError) -> Self {
        match error {
            BanAccountError::AdminAccess(e) => e.into(),
            BanAccountError::AccountStoreError(e) => e.into(),
        }
    }
}

impl From<UnbanAccountError> for AuthApiError {
    fn from(error: UnbanAccountError) -> Self {
        match error {
            UnbanAccountError::AdminAccess(e) => e.into(),
            UnbanAccountError::AccountStoreError(e) => e.into(),
        }
    }
}

impl From<ChangeRoleError> for AuthApiError {
    fn from(error: ChangeRoleError) -> Self {
        match error {
            ChangeRoleError::AdminAccess(e) => e.into(),
            ChangeRoleError::AccountStoreError(e) => e.into(),
        }
    }
}

impl From<GetProfileError> for AuthApiError {
    fn from(error: GetProfileError) -> Self {
        match error {
            GetProfileError::AdminAccess(e) => e.into(),
            GetProfileError::AccountStoreError(e) => e.into(),
        }
    }
}

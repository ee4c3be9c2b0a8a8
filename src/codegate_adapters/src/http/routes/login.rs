use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use codegate_application::LoginUseCase;
use codegate_core::{AccountStore, Email, Password, TokenIssuer};
use secrecy::Secret;
use serde::Deserialize;

use super::error::AuthApiError;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: Secret<String>,
    pub password: Secret<String>,
}

#[tracing::instrument(name = "Login", skip_all)]
pub async fn login<A, T>(
    State((account_store, token_issuer)): State<(A, T)>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, AuthApiError>
where
    A: AccountStore + Clone + 'static,
    T: TokenIssuer + Clone + 'static,
{
    let email = Email::try_from(request.email)?;
    // A password that fails the policy can never match a stored one.
    let password = Password::try_from(request.password)
        .map_err(|_| AuthApiError::AuthenticationError("Incorrect credentials".to_string()))?;

    let use_case = LoginUseCase::new(account_store, token_issuer);
    let tokens = use_case.execute(email, password).await?;

    Ok((StatusCode::OK, Json(tokens)))
}

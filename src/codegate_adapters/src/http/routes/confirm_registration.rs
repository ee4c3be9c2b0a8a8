use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use codegate_application::{ConfirmRegistrationUseCase, VerificationCodeManager};
use codegate_core::{
    AccountStore, Email, EmailClient, TokenIssuer, VerificationCode, VerificationCodeStore,
};
use secrecy::Secret;
use serde::Deserialize;

use super::error::AuthApiError;

#[derive(Deserialize)]
pub struct ConfirmRegistrationRequest {
    pub email: Secret<String>,
    pub code: String,
}

#[tracing::instrument(name = "Confirm registration", skip_all)]
pub async fn confirm_registration<A, S, E, T>(
    State((account_store, verification, token_issuer)): State<(
        A,
        VerificationCodeManager<S, E>,
        T,
    )>,
    Json(request): Json<ConfirmRegistrationRequest>,
) -> Result<impl IntoResponse, AuthApiError>
where
    A: AccountStore + Clone + 'static,
    S: VerificationCodeStore + Clone + 'static,
    E: EmailClient + Clone + 'static,
    T: TokenIssuer + Clone + 'static,
{
    let email = Email::try_from(request.email)?;
    let code = VerificationCode::parse(&request.code)?;

    let use_case = ConfirmRegistrationUseCase::new(account_store, verification, token_issuer);
    let tokens = use_case.execute(email, code).await?;

    Ok((StatusCode::OK, Json(tokens)))
}

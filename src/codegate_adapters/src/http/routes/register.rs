use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use codegate_application::{RegisterUseCase, VerificationCodeManager};
use codegate_core::{AccountStore, Email, EmailClient, Password, VerificationCodeStore};
use secrecy::Secret;
use serde::Deserialize;

use super::{error::AuthApiError, responses::CodeSentResponse};

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: Secret<String>,
    pub password: Secret<String>,
}

#[tracing::instrument(name = "Register", skip_all)]
pub async fn register<A, S, E>(
    State((account_store, verification)): State<(A, VerificationCodeManager<S, E>)>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AuthApiError>
where
    A: AccountStore + Clone + 'static,
    S: VerificationCodeStore + Clone + 'static,
    E: EmailClient + Clone + 'static,
{
    let email = Email::try_from(request.email)?;
    let password = Password::try_from(request.password)?;

    let use_case = RegisterUseCase::new(account_store, verification);
    let issued = use_case.execute(email, password).await?;

    Ok((
        StatusCode::CREATED,
        Json(CodeSentResponse::new(
            "Registration successful. Please check your email for the confirmation code.",
            &issued,
        )),
    ))
}

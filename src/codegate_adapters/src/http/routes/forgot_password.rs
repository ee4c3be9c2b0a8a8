use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use codegate_application::{ForgotPasswordUseCase, VerificationCodeManager};
use codegate_core::{AccountStore, Email, EmailClient, VerificationCodeStore};
use secrecy::Secret;
use serde::Deserialize;

use super::{error::AuthApiError, responses::CodeSentResponse};

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: Secret<String>,
}

#[tracing::instrument(name = "Forgot password", skip_all)]
pub async fn forgot_password<A, S, E>(
    State((account_store, verification)): State<(A, VerificationCodeManager<S, E>)>,
    Json(request): Json<ForgotPasswordRequest>,
) -> Result<impl IntoResponse, AuthApiError>
where
    A: AccountStore + Clone + 'static,
    S: VerificationCodeStore + Clone + 'static,
    E: EmailClient + Clone + 'static,
{
    let email = Email::try_from(request.email)?;

    let use_case = ForgotPasswordUseCase::new(account_store, verification);
    let issued = use_case.execute(email).await?;

    Ok((
        StatusCode::OK,
        Json(CodeSentResponse::new(
            "A password recovery code has been sent to your email.",
            &issued,
        )),
    ))
}

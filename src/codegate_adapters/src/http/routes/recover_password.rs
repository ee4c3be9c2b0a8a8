use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use codegate_application::{RecoverPasswordUseCase, VerificationCodeManager};
use codegate_core::{
    AccountStore, Email, EmailClient, Password, VerificationCode, VerificationCodeStore,
};
use secrecy::Secret;
use serde::Deserialize;

use super::{error::AuthApiError, responses::MessageResponse};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecoverPasswordRequest {
    pub email: Secret<String>,
    pub code: String,
    pub new_password: Secret<String>,
}

#[tracing::instrument(name = "Recover password", skip_all)]
pub async fn recover_password<A, S, E>(
    State((account_store, verification)): State<(A, VerificationCodeManager<S, E>)>,
    Json(request): Json<RecoverPasswordRequest>,
) -> Result<impl IntoResponse, AuthApiError>
where
    A: AccountStore + Clone + 'static,
    S: VerificationCodeStore + Clone + 'static,
    E: EmailClient + Clone + 'static,
{
    let email = Email::try_from(request.email)?;
    let code = VerificationCode::parse(&request.code)?;
    let new_password = Password::try_from(request.new_password)?;

    let use_case = RecoverPasswordUseCase::new(account_store, verification);
    use_case.execute(email, code, new_password).await?;

    Ok((
        StatusCode::OK,
        Json(MessageResponse {
            message: "Password has been reset successfully.".to_string(),
        }),
    ))
}

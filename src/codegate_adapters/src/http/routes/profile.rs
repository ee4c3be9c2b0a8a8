use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use codegate_application::GetProfileUseCase;
use codegate_core::{AccountStore, TokenIssuer};

use super::{access::bearer_session, error::AuthApiError, responses::AccountResponse};

#[tracing::instrument(name = "Get profile", skip_all)]
pub async fn get_profile<A, T>(
    State((account_store, token_issuer)): State<(A, T)>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AuthApiError>
where
    A: AccountStore + Clone + 'static,
    T: TokenIssuer + Clone + 'static,
{
    let session = bearer_session(&headers, &token_issuer)?;

    let use_case = GetProfileUseCase::new(account_store);
    let account = use_case.execute(session.account_id).await?;

    Ok((StatusCode::OK, Json(AccountResponse::from(account))))
}

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use codegate_application::{BanAccountUseCase, UnbanAccountUseCase};
use codegate_core::{AccountStore, TokenIssuer};

use super::{
    access::{TargetQuery, bearer_session},
    error::AuthApiError,
    responses::AccountResponse,
};

#[tracing::instrument(name = "Ban account", skip_all)]
pub async fn ban_account<A, T>(
    State((account_store, token_issuer)): State<(A, T)>,
    headers: HeaderMap,
    Path(target): Path<String>,
    Query(query): Query<TargetQuery>,
) -> Result<impl IntoResponse, AuthApiError>
where
    A: AccountStore + Clone + 'static,
    T: TokenIssuer + Clone + 'static,
{
    let session = bearer_session(&headers, &token_issuer)?;
    let target = query.lookup(target)?;

    let use_case = BanAccountUseCase::new(account_store);
    let account = use_case.execute(session.account_id, target).await?;

    Ok((StatusCode::OK, Json(AccountResponse::from(account))))
}

#[tracing::instrument(name = "Unban account", skip_all)]
pub async fn unban_account<A, T>(
    State((account_store, token_issuer)): State<(A, T)>,
    headers: HeaderMap,
    Path(target): Path<String>,
    Query(query): Query<TargetQuery>,
) -> Result<impl IntoResponse, AuthApiError>
where
    A: AccountStore + Clone + 'static,
    T: TokenIssuer + Clone + 'static,
{
    let session = bearer_session(&headers, &token_issuer)?;
    let target = query.lookup(target)?;

    let use_case = UnbanAccountUseCase::new(account_store);
    let account = use_case.execute(session.account_id, target).await?;

    Ok((StatusCode::OK, Json(AccountResponse::from(account))))
}

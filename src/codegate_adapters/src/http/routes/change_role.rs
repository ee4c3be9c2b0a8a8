use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use codegate_application::ChangeRoleUseCase;
use codegate_core::{AccountStore, Role, TokenIssuer};
use serde::Deserialize;

use super::{
    access::{TargetQuery, bearer_session},
    error::AuthApiError,
    responses::AccountResponse,
};

#[derive(Debug, Default, Deserialize)]
pub struct ChangeRoleQuery {
    pub data: Option<String>,
    pub role: Option<String>,
}

#[tracing::instrument(name = "Change account role", skip_all)]
pub async fn change_role<A, T>(
    State((account_store, token_issuer)): State<(A, T)>,
    headers: HeaderMap,
    Path(target): Path<String>,
    Query(query): Query<ChangeRoleQuery>,
) -> Result<impl IntoResponse, AuthApiError>
where
    A: AccountStore + Clone + 'static,
    T: TokenIssuer + Clone + 'static,
{
    let session = bearer_session(&headers, &token_issuer)?;
    let role = query
        .role
        .as_deref()
        .ok_or_else(|| AuthApiError::InvalidInput("Missing role".to_string()))?
        .parse::<Role>()?;
    let target = TargetQuery { data: query.data }.lookup(target)?;

    let use_case = ChangeRoleUseCase::new(account_store);
    let account = use_case.execute(session.account_id, target, role).await?;

    Ok((StatusCode::OK, Json(AccountResponse::from(account))))
}

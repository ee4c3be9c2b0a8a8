use axum::http::{HeaderMap, header::AUTHORIZATION};
use codegate_core::{AccountLookup, Email, Session, TokenIssuer};
use secrecy::Secret;
use serde::Deserialize;

use super::error::AuthApiError;

/// Validate the `Authorization: Bearer <access token>` header.
pub fn bearer_session<T: TokenIssuer>(
    headers: &HeaderMap,
    token_issuer: &T,
) -> Result<Session, AuthApiError> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AuthApiError::MissingToken)?;

    Ok(token_issuer.validate_access(token)?)
}

/// `?data=id|email` names how the path segment identifies the account.
/// Without it the segment is read as an id.
#[derive(Debug, Default, Deserialize)]
pub struct TargetQuery {
    pub data: Option<String>,
}

impl TargetQuery {
    pub fn lookup(&self, target: String) -> Result<AccountLookup, AuthApiError> {
        match self.data.as_deref().unwrap_or("id") {
            "id" => target
                .parse()
                .map(AccountLookup::Id)
                .map_err(|_| AuthApiError::InvalidInput(format!("Invalid account id: {target}"))),
            "email" => Ok(AccountLookup::Email(Email::try_from(Secret::new(target))?)),
            other => Err(AuthApiError::InvalidInput(format!(
                "Unknown lookup field: {other}"
            ))),
        }
    }
}

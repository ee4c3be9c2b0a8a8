use serde::Serialize;
use uuid::Uuid;

use super::account::Role;

/// Signed session tokens handed out after a successful login or confirmation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// The caller identified by a valid access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub account_id: Uuid,
    pub role: Role,
}

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::{email::Email, password::Password};

#[derive(Debug, Error, PartialEq)]
#[error("Unknown role: {0}")]
pub struct RoleError(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
    Courier,
    Manager,
    Banned,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
            Role::Courier => "courier",
            Role::Manager => "manager",
            Role::Banned => "banned",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            "courier" => Ok(Role::Courier),
            "manager" => Ok(Role::Manager),
            "banned" => Ok(Role::Banned),
            other => Err(RoleError(other.to_string())),
        }
    }
}

/// An account as read back from the account store.
///
/// The password hash never leaves the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id: Uuid,
    pub email: Email,
    pub role: Role,
    pub is_confirmed: bool,
    pub confirmed_at: Option<DateTime<Utc>>,
}

/// How an administrator names the account an operation targets.
#[derive(Debug, Clone, PartialEq)]
pub enum AccountLookup {
    Id(Uuid),
    Email(Email),
}

/// Data needed to create an unconfirmed account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub id: Uuid,
    pub email: Email,
    pub password: Password,
    pub role: Role,
}

impl NewAccount {
    /// A regular, unconfirmed user account with a fresh identifier.
    pub fn user(email: Email, password: Password) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            password,
            role: Role::User,
        }
    }
}

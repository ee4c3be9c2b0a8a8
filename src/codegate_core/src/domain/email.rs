use std::hash::{Hash, Hasher};
use std::sync::LazyLock;

use regex::Regex;
use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("email regex is valid")
});

#[derive(Debug, Error, PartialEq)]
pub enum EmailError {
    #[error("Invalid email format")]
    InvalidFormat,
}

/// A syntactically valid email address.
///
/// The raw value is kept behind [`Secret`] so it never ends up in logs by accident.
#[derive(Debug, Clone)]
pub struct Email(Secret<String>);

impl Email {
    pub fn parse(raw: Secret<String>) -> Result<Self, EmailError> {
        let trimmed = raw.expose_secret().trim();
        if !EMAIL_REGEX.is_match(trimmed) {
            return Err(EmailError::InvalidFormat);
        }
        Ok(Self(Secret::new(trimmed.to_owned())))
    }
}

impl TryFrom<Secret<String>> for Email {
    type Error = EmailError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl AsRef<Secret<String>> for Email {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl PartialEq for Email {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl Eq for Email {}

impl Hash for Email {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.expose_secret().hash(state);
    }
}

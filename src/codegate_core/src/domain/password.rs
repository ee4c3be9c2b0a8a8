use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

const MIN_LENGTH: usize = 8;
const SPECIAL_CHARACTERS: &str = r#"!@#$%^&*()_+-=[]{};':"\|,.<>/?"#;

#[derive(Debug, Error, PartialEq)]
pub enum PasswordError {
    #[error("Password must be at least 8 characters long")]
    TooShort,
    #[error("Password must contain at least one number")]
    MissingDigit,
    #[error("Password must contain at least one uppercase letter")]
    MissingUppercase,
    #[error("Password must contain at least one special character")]
    MissingSpecialCharacter,
}

/// A password that satisfies the account password policy.
#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl Password {
    pub fn parse(raw: Secret<String>) -> Result<Self, PasswordError> {
        let value = raw.expose_secret();

        if value.chars().count() < MIN_LENGTH {
            return Err(PasswordError::TooShort);
        }
        if !value.chars().any(|c| c.is_ascii_digit()) {
            return Err(PasswordError::MissingDigit);
        }
        if !value.chars().any(|c| c.is_ascii_uppercase()) {
            return Err(PasswordError::MissingUppercase);
        }
        if !value.chars().any(|c| SPECIAL_CHARACTERS.contains(c)) {
            return Err(PasswordError::MissingSpecialCharacter);
        }

        Ok(Self(raw))
    }
}

impl TryFrom<Secret<String>> for Password {
    type Error = PasswordError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl AsRef<Secret<String>> for Password {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

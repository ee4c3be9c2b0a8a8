pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    account::{Account, AccountLookup, NewAccount, Role, RoleError},
    email::{Email, EmailError},
    issued_code::IssuedCode,
    password::{Password, PasswordError},
    token::{Session, TokenPair},
    verification_code::{CodeError, CodePurpose, VerificationCode},
    verification_email::VerificationEmail,
};

pub use ports::{
    repositories::{
        AccountStore, AccountStoreError, CodeCheck, CodeStoreError, PendingCode,
        VerificationCodeStore,
    },
    services::{EmailClient, TokenIssuer, TokenIssuerError},
};

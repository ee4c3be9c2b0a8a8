//! # Codegate - Email Verification and Account Service Library
//!
//! This is a facade crate that re-exports all public APIs from the codegate components.
//! Use this crate to get access to the verification code flow, the account use cases
//! and the HTTP service in one place.
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Password`, `VerificationCode`, `Account`, etc.
//! - **Port traits**: `VerificationCodeStore`, `AccountStore`, `EmailClient`, `TokenIssuer`
//! - **Use cases**: `VerificationCodeManager`, `RegisterUseCase`, `BanAccountUseCase`, etc.
//! - **Adapters**: `RedisVerificationCodeStore`, `PostgresAccountStore`, `PostmarkEmailClient`, etc.
//! - **Service**: `CodegateService` - The main entry point for the HTTP service

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use codegate_core::*;
}

pub use codegate_core::{
    Account, AccountLookup, CodeError, CodePurpose, Email, EmailError, IssuedCode, NewAccount,
    Password, PasswordError, Role, Session, TokenPair, VerificationCode, VerificationEmail,
};

// ============================================================================
// Port Traits
// ============================================================================

/// Port trait definitions
pub mod ports {
    pub use codegate_core::{
        AccountStore, AccountStoreError, CodeCheck, CodeStoreError, EmailClient, PendingCode,
        TokenIssuer, TokenIssuerError, VerificationCodeStore,
    };
}

pub use codegate_core::{AccountStore, EmailClient, TokenIssuer, VerificationCodeStore};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use codegate_application::*;
}

pub use codegate_application::{
    BanAccountUseCase, ChangeRoleUseCase, ConfirmRegistrationUseCase, ForgotPasswordUseCase,
    GetProfileUseCase, LoginUseCase, RecoverPasswordUseCase, RegisterUseCase,
    ResendConfirmationUseCase, UnbanAccountUseCase, VerificationCodeManager, VerificationError,
    VerificationSettings,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// HTTP route handlers
    pub mod http {
        pub use codegate_adapters::http::*;
    }

    /// Persistence implementations
    pub mod persistence {
        pub use codegate_adapters::persistence::*;
    }

    /// Email client implementations
    pub mod email {
        pub use codegate_adapters::email::*;
    }

    /// Token issuing
    pub mod auth {
        pub use codegate_adapters::auth::*;
    }

    /// Configuration
    pub mod config {
        pub use codegate_adapters::config::*;
    }
}

pub use codegate_adapters::{
    auth::JwtTokenIssuer,
    email::{MockEmailClient, PostmarkEmailClient},
    persistence::{
        HashMapAccountStore, HashMapVerificationCodeStore, PostgresAccountStore,
        RedisVerificationCodeStore,
    },
};

// ============================================================================
// Service (Main Entry Point)
// ============================================================================

/// Main codegate service
pub use codegate_service::{
    CodegateService, configure_postgresql, configure_redis, get_redis_client,
};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing port traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub mod use_cases;
pub mod verification_code_manager;

#[cfg(test)]
mod test_support;

// Re-export for convenience
pub use use_cases::{
    AdminAccessError, BanAccountError, BanAccountUseCase, ChangeRoleError, ChangeRoleUseCase,
    ConfirmRegistrationError, ConfirmRegistrationUseCase, ForgotPasswordError,
    ForgotPasswordUseCase, GetProfileError, GetProfileUseCase, LoginError, LoginUseCase,
    RecoverPasswordError, RecoverPasswordUseCase, RegisterError, RegisterUseCase,
    ResendConfirmationError, ResendConfirmationUseCase, UnbanAccountError, UnbanAccountUseCase,
};
pub use verification_code_manager::{
    VerificationCodeManager, VerificationError, VerificationSettings,
};

pub mod account_access;
pub mod ban_account;
pub mod change_role;
pub mod confirm_registration;
pub mod forgot_password;
pub mod get_profile;
pub mod login;
pub mod recover_password;
pub mod register;
pub mod resend_confirmation;
pub mod unban_account;

// Re-export for convenience
pub use account_access::AdminAccessError;
pub use ban_account::{BanAccountError, BanAccountUseCase};
pub use change_role::{ChangeRoleError, ChangeRoleUseCase};
pub use confirm_registration::{ConfirmRegistrationError, ConfirmRegistrationUseCase};
pub use forgot_password::{ForgotPasswordError, ForgotPasswordUseCase};
pub use get_profile::{GetProfileError, GetProfileUseCase};
pub use login::{LoginError, LoginUseCase};
pub use recover_password::{RecoverPasswordError, RecoverPasswordUseCase};
pub use register::{RegisterError, RegisterUseCase};
pub use resend_confirmation::{ResendConfirmationError, ResendConfirmationUseCase};
pub use unban_account::{UnbanAccountError, UnbanAccountUseCase};

pub mod access;
pub mod ban_account;
pub mod change_role;
pub mod confirm_registration;
pub mod error;
pub mod forgot_password;
pub mod get_account;
pub mod health;
pub mod login;
pub mod profile;
pub mod recover_password;
pub mod register;
pub mod resend_confirmation;
pub mod responses;

pub use access::{TargetQuery, bearer_session};
pub use ban_account::{ban_account, unban_account};
pub use change_role::{ChangeRoleQuery, change_role};
pub use confirm_registration::{ConfirmRegistrationRequest, confirm_registration};
pub use error::{AuthApiError, ErrorResponse};
pub use forgot_password::{ForgotPasswordRequest, forgot_password};
pub use get_account::get_account;
pub use health::health;
pub use login::{LoginRequest, login};
pub use profile::get_profile;
pub use recover_password::{RecoverPasswordRequest, recover_password};
pub use register::{RegisterRequest, register};
pub use resend_confirmation::{ResendConfirmationRequest, resend_confirmation};
pub use responses::{AccountResponse, CodeSentResponse, MessageResponse};

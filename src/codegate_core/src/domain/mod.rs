pub mod account;
pub mod email;
pub mod issued_code;
pub mod password;
pub mod token;
pub mod verification_code;
pub mod verification_email;

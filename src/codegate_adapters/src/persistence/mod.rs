pub mod hashmap_account_store;
pub mod hashmap_verification_code_store;
pub mod postgres_account_store;
pub mod redis_verification_code_store;

pub use hashmap_account_store::HashMapAccountStore;
pub use hashmap_verification_code_store::HashMapVerificationCodeStore;
pub use postgres_account_store::PostgresAccountStore;
pub use redis_verification_code_store::RedisVerificationCodeStore;

use codegate_core::{CodePurpose, Email};
use secrecy::ExposeSecret;

// We are using a key prefix to prevent collisions and organize data!
const VERIFICATION_CODE_KEY_PREFIX: &str = "verification_code:";

/// Store key of the pending code for `(purpose, email)`.
pub(crate) fn verification_code_key(purpose: CodePurpose, email: &Email) -> String {
    format!(
        "{}{}:{}",
        VERIFICATION_CODE_KEY_PREFIX,
        purpose.as_str(),
        email.as_ref().expose_secret()
    )
}

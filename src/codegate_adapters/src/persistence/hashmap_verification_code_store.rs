use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use codegate_core::{
    CodeCheck, CodePurpose, CodeStoreError, Email, PendingCode, VerificationCode,
    VerificationCodeStore,
};
use tokio::sync::RwLock;
use tokio::time::Instant;

use super::verification_code_key;

#[derive(Debug, Clone)]
struct Entry {
    code: VerificationCode,
    failed_attempts: u32,
    expires_at: Instant,
}

impl Entry {
    fn is_live(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

/// In-process expiring code store.
///
/// Every operation runs under the write lock, which makes check-and-delete
/// atomic in the same way the redis scripts are. Expired entries are treated
/// as absent and dropped lazily.
#[derive(Default, Clone)]
pub struct HashMapVerificationCodeStore {
    codes: Arc<RwLock<HashMap<String, Entry>>>,
}

impl HashMapVerificationCodeStore {
    pub fn new() -> Self {
        Self {
            codes: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait::async_trait]
impl VerificationCodeStore for HashMapVerificationCodeStore {
    async fn store_code(
        &self,
        purpose: CodePurpose,
        email: &Email,
        code: &VerificationCode,
        ttl: Duration,
    ) -> Result<(), CodeStoreError> {
        let mut codes = self.codes.write().await;
        codes.retain(|_, entry| entry.is_live());
        codes.insert(
            verification_code_key(purpose, email),
            Entry {
                code: code.clone(),
                failed_attempts: 0,
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    async fn get_code(
        &self,
        purpose: CodePurpose,
        email: &Email,
    ) -> Result<Option<PendingCode>, CodeStoreError> {
        let codes = self.codes.read().await;
        Ok(codes
            .get(&verification_code_key(purpose, email))
            .filter(|entry| entry.is_live())
            .map(|entry| PendingCode {
                code: entry.code.clone(),
                failed_attempts: entry.failed_attempts,
            }))
    }

    async fn revoke_code(
        &self,
        purpose: CodePurpose,
        email: &Email,
        code: &VerificationCode,
    ) -> Result<bool, CodeStoreError> {
        let mut codes = self.codes.write().await;
        let key = verification_code_key(purpose, email);

        match codes.get(&key) {
            Some(entry) if entry.is_live() && &entry.code == code => {
                codes.remove(&key);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn consume_code(
        &self,
        purpose: CodePurpose,
        email: &Email,
        presented: &VerificationCode,
        max_attempts: u32,
    ) -> Result<CodeCheck, CodeStoreError> {
        let mut codes = self.codes.write().await;
        let key = verification_code_key(purpose, email);

        let Some(entry) = codes.get_mut(&key) else {
            return Ok(CodeCheck::Missing);
        };

        if !entry.is_live() {
            codes.remove(&key);
            return Ok(CodeCheck::Missing);
        }

        if &entry.code == presented {
            codes.remove(&key);
            return Ok(CodeCheck::Matched);
        }

        entry.failed_attempts += 1;
        if entry.failed_attempts >= max_attempts {
            codes.remove(&key);
            return Ok(CodeCheck::Exhausted);
        }

        Ok(CodeCheck::Mismatched {
            remaining_attempts: max_attempts - entry.failed_attempts,
        })
    }
}

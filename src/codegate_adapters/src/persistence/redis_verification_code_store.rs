use std::sync::{Arc, LazyLock};
use std::time::Duration;

use codegate_core::{
    CodeCheck, CodePurpose, CodeStoreError, Email, PendingCode, VerificationCode,
    VerificationCodeStore,
};
use redis::{Connection, RedisError, Script};
use tokio::sync::RwLock;

use super::verification_code_key;

// Pending codes are hashes {code, attempts}. Every mutation is a script so
// that it runs atomically on the server.

static STORE_SCRIPT: LazyLock<Script> = LazyLock::new(|| {
    Script::new(
        r"
        redis.call('DEL', KEYS[1])
        redis.call('HSET', KEYS[1], 'code', ARGV[1], 'attempts', 0)
        redis.call('PEXPIRE', KEYS[1], ARGV[2])
        return 1
        ",
    )
});

static REVOKE_SCRIPT: LazyLock<Script> = LazyLock::new(|| {
    Script::new(
        r"
        if redis.call('HGET', KEYS[1], 'code') == ARGV[1] then
            return redis.call('DEL', KEYS[1])
        end
        return 0
        ",
    )
});

// Returns {status, failed_attempts}: 0 missing, 1 matched, 2 mismatched, 3 exhausted.
// HINCRBY keeps the key's remaining TTL.
static CONSUME_SCRIPT: LazyLock<Script> = LazyLock::new(|| {
    Script::new(
        r"
        local stored = redis.call('HGET', KEYS[1], 'code')
        if not stored then
            return {0, 0}
        end
        if stored == ARGV[1] then
            redis.call('DEL', KEYS[1])
            return {1, 0}
        end
        local attempts = redis.call('HINCRBY', KEYS[1], 'attempts', 1)
        if attempts >= tonumber(ARGV[2]) then
            redis.call('DEL', KEYS[1])
            return {3, attempts}
        end
        return {2, attempts}
        ",
    )
});

const STATUS_MISSING: i64 = 0;
const STATUS_MATCHED: i64 = 1;
const STATUS_MISMATCHED: i64 = 2;
const STATUS_EXHAUSTED: i64 = 3;

#[derive(Clone)]
pub struct RedisVerificationCodeStore {
    conn: Arc<RwLock<Connection>>,
}

impl RedisVerificationCodeStore {
    pub fn new(conn: Arc<RwLock<Connection>>) -> Self {
        Self { conn }
    }
}

fn unavailable(e: RedisError) -> CodeStoreError {
    CodeStoreError::Unavailable(e.to_string())
}

#[async_trait::async_trait]
impl VerificationCodeStore for RedisVerificationCodeStore {
    #[tracing::instrument(name = "Storing verification code in Redis", skip_all)]
    async fn store_code(
        &self,
        purpose: CodePurpose,
        email: &Email,
        code: &VerificationCode,
        ttl: Duration,
    ) -> Result<(), CodeStoreError> {
        let key = verification_code_key(purpose, email);
        let ttl_millis = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX);

        let mut conn = self.conn.write().await;
        STORE_SCRIPT
            .key(&key)
            .arg(code.as_str())
            .arg(ttl_millis)
            .invoke::<i64>(&mut *conn)
            .map_err(unavailable)?;

        Ok(())
    }

    #[tracing::instrument(name = "Reading verification code from Redis", skip_all)]
    async fn get_code(
        &self,
        purpose: CodePurpose,
        email: &Email,
    ) -> Result<Option<PendingCode>, CodeStoreError> {
        let key = verification_code_key(purpose, email);

        let mut conn = self.conn.write().await;
        let (code, attempts): (Option<String>, Option<u32>) = redis::cmd("HMGET")
            .arg(&key)
            .arg("code")
            .arg("attempts")
            .query(&mut *conn)
            .map_err(unavailable)?;

        let Some(code) = code else {
            return Ok(None);
        };
        let code = VerificationCode::parse(&code)
            .map_err(|e| CodeStoreError::Unavailable(format!("corrupt code record: {e}")))?;

        Ok(Some(PendingCode {
            code,
            failed_attempts: attempts.unwrap_or(0),
        }))
    }

    #[tracing::instrument(name = "Revoking verification code in Redis", skip_all)]
    async fn revoke_code(
        &self,
        purpose: CodePurpose,
        email: &Email,
        code: &VerificationCode,
    ) -> Result<bool, CodeStoreError> {
        let key = verification_code_key(purpose, email);

        let mut conn = self.conn.write().await;
        let deleted = REVOKE_SCRIPT
            .key(&key)
            .arg(code.as_str())
            .invoke::<i64>(&mut *conn)
            .map_err(unavailable)?;

        Ok(deleted > 0)
    }

    #[tracing::instrument(name = "Consuming verification code in Redis", skip_all)]
    async fn consume_code(
        &self,
        purpose: CodePurpose,
        email: &Email,
        presented: &VerificationCode,
        max_attempts: u32,
    ) -> Result<CodeCheck, CodeStoreError> {
        let key = verification_code_key(purpose, email);

        let mut conn = self.conn.write().await;
        let (status, attempts): (i64, i64) = CONSUME_SCRIPT
            .key(&key)
            .arg(presented.as_str())
            .arg(max_attempts)
            .invoke(&mut *conn)
            .map_err(unavailable)?;

        match status {
            STATUS_MISSING => Ok(CodeCheck::Missing),
            STATUS_MATCHED => Ok(CodeCheck::Matched),
            STATUS_MISMATCHED => {
                let used = u32::try_from(attempts).unwrap_or(max_attempts);
                Ok(CodeCheck::Mismatched {
                    remaining_attempts: max_attempts.saturating_sub(used),
                })
            }
            STATUS_EXHAUSTED => Ok(CodeCheck::Exhausted),
            other => Err(CodeStoreError::Unavailable(format!(
                "unexpected script status {other}"
            ))),
        }
    }
}

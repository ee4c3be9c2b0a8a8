use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordVerifier, Version,
    password_hash::{PasswordHasher, SaltString, rand_core},
};
use chrono::{DateTime, Utc};
use codegate_core::{Account, AccountStore, AccountStoreError, Email, NewAccount, Password, Role};
use secrecy::{ExposeSecret, Secret};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

#[derive(FromRow)]
struct AccountRow {
    id: Uuid,
    email: String,
    role: String,
    is_confirmed: bool,
    confirmed_at: Option<DateTime<Utc>>,
}

impl TryFrom<AccountRow> for Account {
    type Error = AccountStoreError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let email = Email::try_from(Secret::new(row.email))
            .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;
        let role = row
            .role
            .parse::<Role>()
            .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;

        Ok(Account {
            id: row.id,
            email,
            role,
            is_confirmed: row.is_confirmed,
            confirmed_at: row.confirmed_at,
        })
    }
}

#[derive(FromRow)]
struct CredentialsRow {
    password_hash: String,
    #[sqlx(flatten)]
    account: AccountRow,
}

#[derive(Clone)]
pub struct PostgresAccountStore {
    pool: PgPool,
}

impl PostgresAccountStore {
    pub fn new(pool: PgPool) -> Self {
        PostgresAccountStore { pool }
    }
}

fn unexpected(e: sqlx::Error) -> AccountStoreError {
    AccountStoreError::UnexpectedError(e.to_string())
}

#[async_trait::async_trait]
impl AccountStore for PostgresAccountStore {
    #[tracing::instrument(name = "Adding account to PostgreSQL", skip_all)]
    async fn add_account(&self, account: NewAccount) -> Result<(), AccountStoreError> {
        let password_hash = compute_password_hash(account.password)
            .await
            .map_err(AccountStoreError::UnexpectedError)?;

        sqlx::query(
            r#"
                INSERT INTO accounts (id, email, password_hash, role)
                VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(account.id)
        .bind(account.email.as_ref().expose_secret())
        .bind(password_hash.expose_secret())
        .bind(account.role.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AccountStoreError::AccountAlreadyExists;
                }
            }
            unexpected(e)
        })?;

        Ok(())
    }

    #[tracing::instrument(name = "Retrieving account from PostgreSQL", skip_all)]
    async fn get_account(&self, email: &Email) -> Result<Account, AccountStoreError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
                SELECT id, email, role, is_confirmed, confirmed_at
                FROM accounts
                WHERE email = $1
            "#,
        )
        .bind(email.as_ref().expose_secret())
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        row.ok_or(AccountStoreError::AccountNotFound)?.try_into()
    }

    #[tracing::instrument(name = "Retrieving account by id from PostgreSQL", skip_all)]
    async fn get_account_by_id(&self, id: Uuid) -> Result<Account, AccountStoreError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
                SELECT id, email, role, is_confirmed, confirmed_at
                FROM accounts
                WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        row.ok_or(AccountStoreError::AccountNotFound)?.try_into()
    }

    #[tracing::instrument(name = "Checking account email in PostgreSQL", skip_all)]
    async fn email_exists(&self, email: &Email) -> Result<bool, AccountStoreError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM accounts WHERE email = $1)")
            .bind(email.as_ref().expose_secret())
            .fetch_one(&self.pool)
            .await
            .map_err(unexpected)
    }

    #[tracing::instrument(name = "Validating account credentials in PostgreSQL", skip_all)]
    async fn authenticate(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<Account, AccountStoreError> {
        let row = sqlx::query_as::<_, CredentialsRow>(
            r#"
                SELECT id, email, password_hash, role, is_confirmed, confirmed_at
                FROM accounts
                WHERE email = $1
            "#,
        )
        .bind(email.as_ref().expose_secret())
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        let Some(row) = row else {
            return Err(AccountStoreError::AccountNotFound);
        };

        verify_password_hash(Secret::new(row.password_hash), password.clone())
            .await
            .map_err(|_| AccountStoreError::IncorrectPassword)?;

        row.account.try_into()
    }

    #[tracing::instrument(name = "Confirming account in PostgreSQL", skip_all)]
    async fn confirm_account(
        &self,
        email: &Email,
        confirmed_at: DateTime<Utc>,
    ) -> Result<(), AccountStoreError> {
        let result = sqlx::query(
            r#"
                UPDATE accounts
                SET is_confirmed = TRUE, confirmed_at = $1
                WHERE email = $2
            "#,
        )
        .bind(confirmed_at)
        .bind(email.as_ref().expose_secret())
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(AccountStoreError::AccountNotFound);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Set new password", skip_all)]
    async fn set_new_password(
        &self,
        email: &Email,
        new_password: Password,
    ) -> Result<(), AccountStoreError> {
        let password_hash = compute_password_hash(new_password)
            .await
            .map_err(AccountStoreError::UnexpectedError)?;

        let result = sqlx::query(
            r#"
                UPDATE accounts
                SET password_hash = $1
                WHERE email = $2
            "#,
        )
        .bind(password_hash.expose_secret())
        .bind(email.as_ref().expose_secret())
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(AccountStoreError::AccountNotFound);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Setting account role in PostgreSQL", skip(self))]
    async fn set_role(
        &self,
        id: Uuid,
        role: Role,
        only_from: Option<Role>,
    ) -> Result<Account, AccountStoreError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
                UPDATE accounts
                SET role = $1
                WHERE id = $2 AND ($3::TEXT IS NULL OR role = $3)
                RETURNING id, email, role, is_confirmed, confirmed_at
            "#,
        )
        .bind(role.as_str())
        .bind(id)
        .bind(only_from.map(|r| r.as_str()))
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        match row {
            Some(row) => row.try_into(),
            None => match self.get_account_by_id(id).await {
                Ok(_) => Err(AccountStoreError::RoleConflict),
                Err(e) => Err(e),
            },
        }
    }
}

fn hasher() -> Result<Argon2<'static>, String> {
    Ok(Argon2::new(
        Algorithm::Argon2id,
        Version::V0x13,
        Params::new(15000, 2, 1, None).map_err(|e| e.to_string())?,
    ))
}

#[tracing::instrument(name = "Verify password hash", skip_all)]
async fn verify_password_hash(
    expected_password_hash: Secret<String>,
    password_candidate: Password,
) -> Result<(), String> {
    let current_span: tracing::Span = tracing::Span::current();
    tokio::task::spawn_blocking(move || {
        current_span.in_scope(|| {
            let expected_password_hash: PasswordHash<'_> =
                PasswordHash::new(expected_password_hash.expose_secret())
                    .map_err(|e| e.to_string())?;

            hasher()?
                .verify_password(
                    password_candidate.as_ref().expose_secret().as_bytes(),
                    &expected_password_hash,
                )
                .map_err(|e| e.to_string())
        })
    })
    .await
    .map_err(|e| e.to_string())?
}

#[tracing::instrument(name = "Computing password hash", skip_all)]
async fn compute_password_hash(password: Password) -> Result<Secret<String>, String> {
    let current_span: tracing::Span = tracing::Span::current();

    tokio::task::spawn_blocking(move || {
        current_span.in_scope(move || {
            let salt: SaltString = SaltString::generate(rand_core::OsRng);
            hasher()?
                .hash_password(password.as_ref().expose_secret().as_bytes(), &salt)
                .map(|h| Secret::new(h.to_string()))
                .map_err(|e| e.to_string())
        })
    })
    .await
    .map_err(|e| e.to_string())?
}

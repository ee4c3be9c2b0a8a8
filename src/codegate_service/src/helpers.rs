use codegate_adapters::config::{PostgresSettings, RedisSettings};
use redis::{Client, RedisResult};
use secrecy::ExposeSecret;
use sqlx::{PgPool, postgres::PgPoolOptions};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("Failed to connect to PostgreSQL: {0}")]
    Postgres(#[from] sqlx::Error),
    #[error("Failed to run migrations: {0}")]
    Migrations(#[from] sqlx::migrate::MigrateError),
    #[error("Failed to connect to Redis: {0}")]
    Redis(#[from] redis::RedisError),
}

/// Configure and return a PostgreSQL connection pool
///
/// Connects to the configured database and runs all pending migrations.
pub async fn configure_postgresql(settings: &PostgresSettings) -> Result<PgPool, SetupError> {
    let pg_pool = get_postgres_pool(settings.url.expose_secret()).await?;

    sqlx::migrate!().run(&pg_pool).await?;

    Ok(pg_pool)
}

/// Configure and return a Redis connection
pub fn configure_redis(settings: &RedisSettings) -> Result<redis::Connection, SetupError> {
    Ok(get_redis_client(&settings.host_name)?.get_connection()?)
}

/// Create a PostgreSQL connection pool
pub async fn get_postgres_pool(url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new().max_connections(5).connect(url).await
}

/// Create a Redis client
///
/// # Arguments
/// * `redis_hostname` - Redis server hostname, optionally with a port
pub fn get_redis_client(redis_hostname: &str) -> RedisResult<Client> {
    let redis_url = format!("redis://{}/", redis_hostname);
    redis::Client::open(redis_url)
}

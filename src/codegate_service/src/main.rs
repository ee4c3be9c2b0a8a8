use std::sync::Arc;

use codegate_adapters::{
    auth::{JwtConfig, JwtTokenIssuer},
    config::Settings,
    email::{MockEmailClient, PostmarkEmailClient},
    persistence::{PostgresAccountStore, RedisVerificationCodeStore},
};
use codegate_core::{Email, EmailClient};
use codegate_service::{
    CodegateService, configure_postgresql, configure_redis, tracing::init_tracing,
};
use color_eyre::eyre::Result;
use reqwest::Client as HttpClient;
use tokio::sync::RwLock;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let settings = Settings::load()?;

    let pg_pool = configure_postgresql(&settings.postgres).await?;
    let redis_conn = Arc::new(RwLock::new(configure_redis(&settings.redis)?));

    let account_store = PostgresAccountStore::new(pg_pool);
    let code_store = RedisVerificationCodeStore::new(redis_conn);

    match &settings.email_client {
        Some(email_settings) => {
            let http_client = HttpClient::builder()
                .timeout(email_settings.timeout())
                .build()?;

            let email_client = PostmarkEmailClient::new(
                email_settings.base_url.clone(),
                Email::try_from(email_settings.sender.clone())?,
                email_settings.auth_token.clone(),
                http_client,
            );

            serve(settings, account_store, code_store, email_client).await
        }
        None => {
            tracing::warn!("No email client configured, codes are only recorded in memory");
            serve(settings, account_store, code_store, MockEmailClient::new()).await
        }
    }
}

async fn serve<E>(
    settings: &Settings,
    account_store: PostgresAccountStore,
    code_store: RedisVerificationCodeStore,
    email_client: E,
) -> Result<()>
where
    E: EmailClient + Clone + 'static,
{
    let token_issuer = JwtTokenIssuer::new(JwtConfig {
        secret: settings.jwt.secret.clone(),
        access_ttl_seconds: settings.jwt.access_ttl_seconds,
        refresh_ttl_seconds: settings.jwt.refresh_ttl_seconds,
    });

    let service = CodegateService::new(
        account_store,
        code_store,
        email_client,
        token_issuer,
        settings.verification_settings(),
    );

    let listener = tokio::net::TcpListener::bind(&settings.application.address).await?;
    tracing::info!("Starting codegate service...");

    service
        .run_standalone(listener, settings.application.allowed_origins())
        .await?;

    Ok(())
}

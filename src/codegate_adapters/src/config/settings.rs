use std::sync::LazyLock;
use std::time::Duration;

use ::config::{Config, Environment, File, FileFormat};
use axum::http::HeaderValue;
use codegate_application::VerificationSettings;
use secrecy::Secret;
use serde::Deserialize;
use thiserror::Error;

use super::constants::{CONFIG_FILE, ENV_PREFIX, ENV_SEPARATOR, prod};

#[derive(Debug, Clone, Error)]
pub enum SettingsError {
    #[error("Failed to load configuration: {0}")]
    Load(String),
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub application: ApplicationSettings,
    pub postgres: PostgresSettings,
    pub redis: RedisSettings,
    /// When absent, emails are recorded instead of sent.
    pub email_client: Option<EmailClientSettings>,
    pub jwt: JwtSettings,
    #[serde(default)]
    pub verification: VerificationConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSettings {
    #[serde(default = "default_address")]
    pub address: String,
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl Default for ApplicationSettings {
    fn default() -> Self {
        Self {
            address: default_address(),
            allowed_origins: Vec::new(),
        }
    }
}

impl ApplicationSettings {
    /// CORS origins; `None` when no origin is configured.
    pub fn allowed_origins(&self) -> Option<AllowedOrigins> {
        if self.allowed_origins.is_empty() {
            return None;
        }

        let origins = self
            .allowed_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin, "Ignoring invalid allowed origin");
                    None
                }
            })
            .collect();

        Some(AllowedOrigins(origins))
    }
}

#[derive(Debug, Clone, Default)]
pub struct AllowedOrigins(Vec<HeaderValue>);

impl AllowedOrigins {
    pub fn contains(&self, origin: &HeaderValue) -> bool {
        self.0.contains(origin)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostgresSettings {
    pub url: Secret<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedisSettings {
    pub host_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailClientSettings {
    #[serde(default = "default_email_base_url")]
    pub base_url: String,
    pub sender: Secret<String>,
    pub auth_token: Secret<String>,
    #[serde(default = "default_email_timeout_millis")]
    pub timeout_millis: u64,
}

impl EmailClientSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_millis)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    pub secret: Secret<String>,
    #[serde(default = "default_access_ttl_seconds")]
    pub access_ttl_seconds: i64,
    #[serde(default = "default_refresh_ttl_seconds")]
    pub refresh_ttl_seconds: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VerificationConfig {
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: u64,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_ttl_seconds(),
            max_attempts: default_max_attempts(),
        }
    }
}

impl VerificationConfig {
    fn validate(&self) -> Result<(), SettingsError> {
        if self.ttl_seconds == 0 {
            return Err(SettingsError::Parse(
                "verification.ttl_seconds must be greater than zero".to_string(),
            ));
        }
        if self.max_attempts == 0 {
            return Err(SettingsError::Parse(
                "verification.max_attempts must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl From<&VerificationConfig> for VerificationSettings {
    fn from(config: &VerificationConfig) -> Self {
        VerificationSettings {
            ttl: Duration::from_secs(config.ttl_seconds),
            max_attempts: config.max_attempts,
        }
    }
}

fn default_address() -> String {
    prod::APP_ADDRESS.to_string()
}

fn default_email_base_url() -> String {
    prod::email_client::BASE_URL.to_string()
}

fn default_email_timeout_millis() -> u64 {
    prod::email_client::TIMEOUT_MILLIS
}

fn default_access_ttl_seconds() -> i64 {
    prod::jwt::ACCESS_TTL_SECONDS
}

fn default_refresh_ttl_seconds() -> i64 {
    prod::jwt::REFRESH_TTL_SECONDS
}

fn default_ttl_seconds() -> u64 {
    prod::verification::TTL_SECONDS
}

fn default_max_attempts() -> u32 {
    prod::verification::MAX_ATTEMPTS
}

static SETTINGS: LazyLock<Result<Settings, SettingsError>> = LazyLock::new(|| {
    dotenvy::dotenv().ok();
    Settings::build(File::new(CONFIG_FILE, FileFormat::Json).required(false))
});

impl Settings {
    /// Process-wide settings, read once from `config/base.json` and
    /// `CODEGATE__*` environment variables.
    pub fn load() -> Result<&'static Settings, SettingsError> {
        SETTINGS.as_ref().map_err(Clone::clone)
    }

    /// Builds settings from `file` overlaid with the environment.
    pub fn build<F>(file: F) -> Result<Settings, SettingsError>
    where
        F: ::config::Source + Send + Sync + 'static,
    {
        let config = Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .list_separator(",")
                    .with_list_parse_key("application.allowed_origins")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| SettingsError::Load(e.to_string()))?;

        let settings: Settings = config
            .try_deserialize()
            .map_err(|e| SettingsError::Parse(e.to_string()))?;
        settings.verification.validate()?;

        Ok(settings)
    }

    pub fn verification_settings(&self) -> VerificationSettings {
        (&self.verification).into()
    }
}

pub mod constants;
pub mod settings;

pub use constants::*;
pub use settings::{
    AllowedOrigins, ApplicationSettings, EmailClientSettings, JwtSettings, PostgresSettings,
    RedisSettings, Settings, SettingsError, VerificationConfig,
};

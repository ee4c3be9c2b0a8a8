pub mod codegate_service;
pub mod helpers;
pub mod tracing;

pub use codegate_service::CodegateService;
pub use helpers::{
    SetupError, configure_postgresql, configure_redis, get_postgres_pool, get_redis_client,
};

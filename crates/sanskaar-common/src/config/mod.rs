//! Configuration structs

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment,
    InvitationConfig, JwtConfig, RateLimitConfig, ServerConfig, SnowflakeConfig,
    MAX_INVITATION_TTL_HOURS,
};

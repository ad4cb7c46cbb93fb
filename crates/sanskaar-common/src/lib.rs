//! # sanskaar-common
//!
//! Shared utilities: configuration, error handling, bearer token validation, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{Claims, JwtService, TokenType};
pub use config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment,
    InvitationConfig, JwtConfig, RateLimitConfig, ServerConfig, SnowflakeConfig,
    MAX_INVITATION_TTL_HOURS,
};
pub use error::{generic_code, AppError, AppResult};
pub use telemetry::{init_tracing, TracingConfig, TracingError};

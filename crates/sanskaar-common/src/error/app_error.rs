//! Errors raised outside the domain rules: tokens, configuration, storage.

use sanskaar_core::{DomainError, ErrorKind};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Missing authentication")]
    MissingAuth,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Gone: {0}")]
    Expired(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidToken | Self::TokenExpired | Self::MissingAuth => {
                ErrorKind::Unauthenticated
            }
            Self::Forbidden(_) => ErrorKind::Forbidden,
            Self::Validation(_) => ErrorKind::Invalid,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::Expired(_) => ErrorKind::Gone,
            Self::RateLimitExceeded => ErrorKind::Throttled,
            Self::Database(_) | Self::Config(_) | Self::Internal(_) => ErrorKind::Internal,
            Self::Domain(e) => e.kind(),
        }
    }

    /// HTTP status for this error
    #[must_use]
    pub fn status_code(&self) -> u16 {
        self.kind().http_status()
    }

    /// Code sent as `error.code`
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Domain(e) => e.code(),
            Self::InvalidToken => "INVALID_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::MissingAuth => "MISSING_AUTH",
            Self::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            other => generic_code(other.kind()),
        }
    }

    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

/// Fallback code for errors that carry no more specific one
pub fn generic_code(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::Invalid => "VALIDATION_ERROR",
        ErrorKind::Unauthenticated => "UNAUTHENTICATED",
        ErrorKind::Forbidden => "FORBIDDEN",
        ErrorKind::NotFound => "NOT_FOUND",
        ErrorKind::Conflict => "CONFLICT",
        ErrorKind::Gone => "EXPIRED",
        ErrorKind::Throttled => "RATE_LIMIT_EXCEEDED",
        ErrorKind::Internal => "INTERNAL_ERROR",
    }
}

pub type AppResult<T> = Result<T, AppError>;

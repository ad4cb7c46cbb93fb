//! Global `tracing` subscriber.
//!
//! `RUST_LOG` wins over the configured level when it is set.

use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

use crate::config::Environment;

/// Output shape of the global subscriber
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub level: Level,
    /// One JSON object per line
    pub json: bool,
    /// Emit span enter/close events, useful for request timing while developing
    pub span_events: bool,
    pub file_line: bool,
    pub thread_names: bool,
}

impl TracingConfig {
    /// Verbose text logs locally, quiet JSON everywhere else
    #[must_use]
    pub fn for_environment(env: Environment) -> Self {
        let local = matches!(env, Environment::Development);
        Self {
            level: if local { Level::DEBUG } else { Level::INFO },
            json: !local,
            span_events: local,
            file_line: local,
            thread_names: local,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    #[error("Tracing subscriber already initialized")]
    AlreadyInitialized,
}

/// Install the global subscriber; a second call returns an error instead of
/// replacing the first.
pub fn init_tracing(config: TracingConfig) -> Result<(), TracingError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.to_string()));
    let spans = if config.span_events {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let base = fmt::layer()
        .with_file(config.file_line)
        .with_line_number(config.file_line)
        .with_thread_names(config.thread_names)
        .with_span_events(spans);
    let output: Box<dyn Layer<Registry> + Send + Sync> = if config.json {
        base.json().with_current_span(true).boxed()
    } else {
        base.boxed()
    };

    tracing_subscriber::registry()
        .with(output)
        .with(filter)
        .try_init()
        .map_err(|_| TracingError::AlreadyInitialized)
}

//! PostgreSQL connection pool

use std::time::Duration;

use sanskaar_common::DatabaseConfig;
use sqlx::postgres::{PgPool, PgPoolOptions};

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);
const IDLE_TIMEOUT: Duration = Duration::from_secs(300);
const MAX_LIFETIME: Duration = Duration::from_secs(1800);

fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    // a floor above the ceiling would make sqlx refuse to build the pool
    let min = config.min_connections.min(config.max_connections);

    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(min)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .idle_timeout(IDLE_TIMEOUT)
        .max_lifetime(MAX_LIFETIME)
}

/// Open a pool and wait for the first connection
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    pool_options(config).connect(&config.url).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(max: u32, min: u32) -> DatabaseConfig {
        DatabaseConfig {
            url: "postgres://db/sanskaar".to_string(),
            max_connections: max,
            min_connections: min,
            run_migrations: false,
            migrations_dir: "./migrations".to_string(),
        }
    }

    #[test]
    fn test_min_connections_never_exceed_max() {
        let options = pool_options(&config(4, 8));
        assert_eq!(options.get_max_connections(), 4);
        assert_eq!(options.get_min_connections(), 4);

        let options = pool_options(&config(20, 5));
        assert_eq!(options.get_min_connections(), 5);
        assert_eq!(options.get_acquire_timeout(), ACQUIRE_TIMEOUT);
    }
}

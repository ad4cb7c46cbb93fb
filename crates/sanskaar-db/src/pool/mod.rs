//! Connection pool and schema migrations

mod migrations;
mod postgres;

pub use migrations::run_migrations;
pub use postgres::create_pool;

pub use sqlx::postgres::PgPool;

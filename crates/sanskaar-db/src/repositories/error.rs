//! sqlx failures translated into domain errors

use sanskaar_core::error::DomainError;
use sqlx::Error as SqlxError;

pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Name of the unique index a failed write collided with, if any.
/// `Some(None)` means a unique violation whose constraint was not reported.
fn unique_violation(e: &SqlxError) -> Option<Option<&str>> {
    let db = e.as_database_error()?;
    db.is_unique_violation().then(|| db.constraint())
}

/// Any unique violation becomes `on_unique()`
pub fn map_unique_violation(e: SqlxError, on_unique: impl FnOnce() -> DomainError) -> DomainError {
    if unique_violation(&e).is_some() {
        on_unique()
    } else {
        map_db_error(e)
    }
}

/// Only a collision on `index` becomes `on_unique()`; other violations stay
/// database errors
pub fn map_unique_index(
    e: SqlxError,
    index: &str,
    on_unique: impl FnOnce() -> DomainError,
) -> DomainError {
    if unique_violation(&e) == Some(Some(index)) {
        on_unique()
    } else {
        map_db_error(e)
    }
}

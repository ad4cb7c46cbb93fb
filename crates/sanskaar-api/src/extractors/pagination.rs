//! `?after=<id>&limit=<n>` cursor paging for list endpoints

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use sanskaar_core::Snowflake;
use sanskaar_service::services::{DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use serde::Deserialize;

use crate::response::ApiError;

#[derive(Debug, Default, Deserialize)]
struct RawPage {
    after: Option<String>,
    limit: Option<i64>,
}

/// Page request with the cursor parsed and the limit clamped to
/// `1..=MAX_PAGE_LIMIT`.
#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    pub after: Option<Snowflake>,
    pub limit: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            after: None,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl Pagination {
    fn from_raw(raw: RawPage) -> Result<Self, ApiError> {
        let after = match raw.after.as_deref() {
            None => None,
            Some(cursor) => Some(
                cursor
                    .parse()
                    .map_err(|_| ApiError::invalid_query("Invalid 'after' cursor format"))?,
            ),
        };
        let limit = raw.limit.map_or(DEFAULT_PAGE_LIMIT, |n| n.clamp(1, MAX_PAGE_LIMIT));

        Ok(Self { after, limit })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(raw) = Query::<RawPage>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.body_text()))?;
        Self::from_raw(raw)
    }
}

//! JSON bodies that are checked against their `validator` rules before a
//! handler sees them.

use axum::{
    async_trait,
    body::Bytes,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::response::ApiError;

fn unreadable(rejection: JsonRejection) -> ApiError {
    ApiError::invalid_body(rejection.body_text())
}

/// Deserialized and validated request body
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(unreadable)?;
        value.validate()?;
        Ok(Self(value))
    }
}

/// Body that may be left out entirely.
///
/// A zero-length body gives `None` without requiring a content type; anything
/// else must be a valid JSON document.
#[derive(Debug, Clone)]
pub struct OptionalValidatedJson<T>(pub Option<T>);

#[async_trait]
impl<S, T> FromRequest<S> for OptionalValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::invalid_body(e.body_text()))?;
        if bytes.is_empty() {
            return Ok(Self(None));
        }

        let Json(value) = Json::<T>::from_bytes(&bytes).map_err(unreadable)?;
        value.validate()?;
        Ok(Self(Some(value)))
    }
}

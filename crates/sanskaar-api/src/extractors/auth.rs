//! Caller identity from the platform-issued bearer token

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use sanskaar_core::Snowflake;

use crate::response::ApiError;
use crate::state::AppState;

/// The authenticated caller. Tokens are only verified here, never issued.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: Snowflake,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Ok(TypedHeader(Authorization(bearer))) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state).await
        else {
            return Err(ApiError::MissingAuth);
        };

        match AppState::from_ref(state).jwt_service().authenticate(bearer.token()) {
            Ok(user_id) => Ok(Self { user_id }),
            Err(e) => {
                tracing::warn!(error = %e, "bearer token rejected");
                Err(e.into())
            }
        }
    }
}

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;

use super::{
    cookie::{read_cookie, SESSION_COOKIE},
    jwt::JwtKeys,
};
use crate::error::ApiError;

/// Username of the caller, taken from a verified `jwt` session cookie.
pub struct AuthUser(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = read_cookie(&parts.headers, SESSION_COOKIE)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::Unauthorized("Requires an authenticated user.".into()))?;

        let keys = JwtKeys::from_ref(state);
        let claims = keys.verify(token).map_err(|e| {
            warn!(error = %e, "session token rejected");
            ApiError::Internal(format!("Unable to parse JWT: {}.", e))
        })?;

        Ok(AuthUser(claims.username))
    }
}

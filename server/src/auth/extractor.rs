use crate::error::ApiError;
use crate::models::User;
use crate::AppState;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};

use super::session::get_user_from_token;

/// Extractor that validates the Authorization header and provides the authenticated user.
///
/// Use this in any handler that requires authentication:
/// ```ignore
/// async fn my_handler(AuthUser(user): AuthUser) -> impl IntoResponse {
///     // user is the authenticated User
/// }
/// ```
pub struct AuthUser(pub User);

/// The raw bearer token of the request, for handlers that act on the session itself.
pub struct BearerToken(pub String);

#[derive(Debug, Clone, Copy)]
pub enum AuthError {
    MissingHeader,
    InvalidHeader,
    InvalidFormat,
    InvalidToken,
}

impl AuthError {
    pub fn message(self) -> &'static str {
        match self {
            AuthError::MissingHeader => "Missing Authorization header",
            AuthError::InvalidHeader => "Invalid Authorization header",
            AuthError::InvalidFormat => "Invalid Authorization header format",
            AuthError::InvalidToken => "Invalid or expired token",
        }
    }
}

fn bearer_token(parts: &Parts) -> Result<&str, AuthError> {
    let auth_header = parts
        .headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingHeader)?;

    let auth_str = auth_header.to_str().map_err(|_| AuthError::InvalidHeader)?;

    auth_str
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::InvalidFormat)
}

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(BearerToken(bearer_token(parts)?.to_string()))
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app = AppState::from_ref(state);
        let token = bearer_token(parts)?;

        let user = get_user_from_token(app.store.as_ref(), token)?.ok_or(AuthError::InvalidToken)?;

        Ok(AuthUser(user))
    }
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::api::ErrorResponse;
use crate::auth::AuthError;
use crate::images::UploadError;
use crate::recipes::RecipeError;
use crate::store::StoreError;

/// Errors as the HTTP layer reports them.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error("{0}")]
    NotFound(&'static str),

    /// Authenticated, but not the owner. Reported as 401, not 403.
    #[error("Not authorized")]
    Forbidden,

    #[error("{}", .0.message())]
    Unauthenticated(AuthError),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("{0}")]
    Internal(String),
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        ApiError::Unauthenticated(e)
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<RecipeError> for ApiError {
    fn from(e: RecipeError) -> Self {
        match e {
            RecipeError::Validation(msg) => ApiError::Validation(msg),
            RecipeError::NotFound => ApiError::NotFound("Recipe not found"),
            RecipeError::Forbidden => ApiError::Forbidden,
            RecipeError::Store(e) => e.into(),
            RecipeError::Image(e) => ApiError::Internal(format!("failed to store image: {}", e)),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Upload(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Forbidden | ApiError::Unauthenticated(_) | ApiError::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = match &self {
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Server Error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}

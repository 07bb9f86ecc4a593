use super::AuthResponse;
use crate::api::json::JsonBody;
use crate::api::ErrorResponse;
use crate::auth::{create_session, verify_password};
use crate::error::ApiError;
use crate::AppState;
use axum::{extract::State, Json};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body(content = LoginRequest, example = json!({"email": "ada@example.com", "password": "password"})),
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
pub async fn login(
    State(app): State<AppState>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let user = app
        .store
        .get_user_by_email(req.email.trim())?
        .filter(|user| verify_password(&req.password, &user.password_hash))
        .ok_or(ApiError::InvalidCredentials)?;

    let token = create_session(app.store.as_ref(), user.id)?;
    Ok(Json(AuthResponse::new(user, token)))
}

use super::AuthResponse;
use crate::api::json::JsonBody;
use crate::api::ErrorResponse;
use crate::auth::{create_session, hash_password};
use crate::error::ApiError;
use crate::models::NewUser;
use crate::store::StoreError;
use crate::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SignupRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

const USER_EXISTS: &str = "User already exists";

#[utoipa::path(
    post,
    path = "/auth/signup",
    tag = "auth",
    request_body(content = SignupRequest, example = json!({"name": "Ada", "email": "ada@example.com", "password": "password"})),
    responses(
        (status = 201, description = "User created successfully", body = AuthResponse),
        (status = 400, description = "Missing field or email already registered", body = ErrorResponse)
    )
)]
pub async fn signup(
    State(app): State<AppState>,
    JsonBody(req): JsonBody<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let name = req.name.trim();
    let email = req.email.trim();
    if name.is_empty() || email.is_empty() || req.password.is_empty() {
        return Err(ApiError::Validation("Please add all fields".to_string()));
    }

    if app.store.get_user_by_email(email)?.is_some() {
        return Err(ApiError::Validation(USER_EXISTS.to_string()));
    }

    let password_hash = hash_password(&req.password)
        .map_err(|e| ApiError::Internal(format!("failed to hash password: {}", e)))?;

    let user = app
        .store
        .create_user(NewUser {
            name,
            email,
            password_hash: &password_hash,
        })
        .map_err(|e| match e {
            // Lost a race with a concurrent signup for the same address.
            StoreError::DuplicateEmail => ApiError::Validation(USER_EXISTS.to_string()),
            e => e.into(),
        })?;

    let token = create_session(app.store.as_ref(), user.id)?;
    tracing::info!(user_id = %user.id, "user signed up");

    Ok((StatusCode::CREATED, Json(AuthResponse::new(user, token))))
}

use crate::api::{ErrorResponse, MessageResponse};
use crate::auth::{end_session, AuthUser, BearerToken};
use crate::error::ApiError;
use crate::AppState;
use axum::{extract::State, Json};

#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "auth",
    responses(
        (status = 200, description = "Session ended", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn logout(
    AuthUser(user): AuthUser,
    BearerToken(token): BearerToken,
    State(app): State<AppState>,
) -> Result<Json<MessageResponse>, ApiError> {
    end_session(app.store.as_ref(), &token)?;
    tracing::debug!(user_id = %user.id, "session ended");
    Ok(Json(MessageResponse::new("Logged out successfully")))
}

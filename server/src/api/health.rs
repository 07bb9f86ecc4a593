use super::MessageResponse;
use crate::AppState;
use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "The server is up", body = MessageResponse)
    )
)]
pub async fn health() -> Json<MessageResponse> {
    Json(MessageResponse::new("Server is running"))
}

#[derive(OpenApi)]
#[openapi(paths(health))]
pub struct ApiDoc;

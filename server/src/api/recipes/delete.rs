use super::parse_recipe_id;
use crate::api::{ErrorResponse, MessageResponse};
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};

#[utoipa::path(
    delete,
    path = "/recipe/{id}",
    tag = "recipes",
    params(
        ("id" = String, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe deleted successfully", body = MessageResponse),
        (status = 401, description = "Unauthorized, or not the owner", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_recipe(
    AuthUser(user): AuthUser,
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_recipe_id(&id)?;
    app.recipes.delete(user.id, id).await?;
    Ok(Json(MessageResponse::new("Recipe deleted")))
}

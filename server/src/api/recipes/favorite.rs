use super::{parse_recipe_id, RecipeResponse};
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};

#[utoipa::path(
    post,
    path = "/recipe/{id}/favorite",
    tag = "recipes",
    params(
        ("id" = String, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Favorite toggled", body = RecipeResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn toggle_favorite(
    AuthUser(user): AuthUser,
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RecipeResponse>, ApiError> {
    let id = parse_recipe_id(&id)?;
    let view = app.recipes.toggle_favorite(user.id, id)?;
    Ok(Json(view.into()))
}

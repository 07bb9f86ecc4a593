use super::RecipeResponse;
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::recipes::RecipeView;
use crate::AppState;
use axum::{extract::State, Json};

fn respond(views: Vec<RecipeView>) -> Json<Vec<RecipeResponse>> {
    Json(views.into_iter().map(RecipeResponse::from).collect())
}

#[utoipa::path(
    get,
    path = "/recipe",
    tag = "recipes",
    responses(
        (status = 200, description = "Every recipe, oldest first", body = [RecipeResponse])
    )
)]
pub async fn list_recipes(
    State(app): State<AppState>,
) -> Result<Json<Vec<RecipeResponse>>, ApiError> {
    Ok(respond(app.recipes.list()?))
}

#[utoipa::path(
    get,
    path = "/recipe/my",
    tag = "recipes",
    responses(
        (status = 200, description = "Recipes created by the caller", body = [RecipeResponse]),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_my_recipes(
    AuthUser(user): AuthUser,
    State(app): State<AppState>,
) -> Result<Json<Vec<RecipeResponse>>, ApiError> {
    Ok(respond(app.recipes.list_by_creator(user.id)?))
}

#[utoipa::path(
    get,
    path = "/recipe/favorites",
    tag = "recipes",
    responses(
        (status = 200, description = "Recipes the caller has favorited", body = [RecipeResponse]),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_favorite_recipes(
    AuthUser(user): AuthUser,
    State(app): State<AppState>,
) -> Result<Json<Vec<RecipeResponse>>, ApiError> {
    Ok(respond(app.recipes.list_favorites(user.id)?))
}

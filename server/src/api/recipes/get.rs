use super::{parse_recipe_id, RecipeResponse};
use crate::api::ErrorResponse;
use crate::error::ApiError;
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};

#[utoipa::path(
    get,
    path = "/recipe/{id}",
    tag = "recipes",
    params(
        ("id" = String, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe details", body = RecipeResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn get_recipe(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RecipeResponse>, ApiError> {
    let id = parse_recipe_id(&id)?;
    let view = app.recipes.get(id)?;
    Ok(Json(view.into()))
}

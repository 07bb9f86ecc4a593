use super::form::{RecipeForm, RecipeFormRequest};
use super::{parse_recipe_id, RecipeResponse};
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::AppState;
use axum::{
    extract::{Multipart, Path, State},
    Json,
};

/// Empty or missing fields keep their stored values.
#[utoipa::path(
    put,
    path = "/recipe/{id}",
    tag = "recipes",
    params(
        ("id" = String, Path, description = "Recipe ID")
    ),
    request_body(content_type = "multipart/form-data", content = RecipeFormRequest),
    responses(
        (status = 200, description = "Recipe updated successfully", body = RecipeResponse),
        (status = 400, description = "Rejected image", body = ErrorResponse),
        (status = 401, description = "Unauthorized, or not the owner", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_recipe(
    AuthUser(user): AuthUser,
    State(app): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Json<RecipeResponse>, ApiError> {
    let id = parse_recipe_id(&id)?;
    let form = RecipeForm::read(multipart).await?;
    let view = app
        .recipes
        .update(user.id, id, form.input, form.image)
        .await?;
    Ok(Json(view.into()))
}

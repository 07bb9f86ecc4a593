use super::form::{RecipeForm, RecipeFormRequest};
use super::RecipeResponse;
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::AppState;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};

#[utoipa::path(
    post,
    path = "/recipe",
    tag = "recipes",
    request_body(content_type = "multipart/form-data", content = RecipeFormRequest),
    responses(
        (status = 201, description = "Recipe created successfully", body = RecipeResponse),
        (status = 400, description = "Missing field or rejected image", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_recipe(
    AuthUser(user): AuthUser,
    State(app): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<RecipeResponse>), ApiError> {
    let form = RecipeForm::read(multipart).await?;
    let view = app.recipes.create(user.id, form.input, form.image).await?;
    Ok((StatusCode::CREATED, Json(view.into())))
}

pub mod create;
pub mod delete;
pub mod favorite;
pub mod form;
pub mod get;
pub mod list;
pub mod update;

use crate::error::ApiError;
use crate::images::MAX_FILE_SIZE;
use crate::models::{RecipeId, UserId};
use crate::recipes::{Creator, RecipeView};
use crate::AppState;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

/// Leaves room for the text fields next to a maximum-size image; anything
/// bigger is cut off while the body is read.
const MAX_REQUEST_SIZE: usize = 2 * MAX_FILE_SIZE;

/// Returns the router for /recipe endpoints
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/recipe",
            get(list::list_recipes).post(create::create_recipe),
        )
        .route("/recipe/my", get(list::list_my_recipes))
        .route("/recipe/favorites", get(list::list_favorite_recipes))
        .route(
            "/recipe/{id}",
            get(get::get_recipe)
                .put(update::update_recipe)
                .delete(delete::delete_recipe),
        )
        .route("/recipe/{id}/favorite", post(favorite::toggle_favorite))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_SIZE))
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreatorResponse {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

impl From<Creator> for CreatorResponse {
    fn from(creator: Creator) -> Self {
        CreatorResponse {
            id: creator.id,
            name: creator.name,
            email: creator.email,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeResponse {
    pub id: RecipeId,
    pub title: String,
    /// Public path of the cover image, empty if there is none
    pub cover_image: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
    /// Null only if the owning account no longer exists
    pub created_by: Option<CreatorResponse>,
    pub favorites: Vec<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RecipeView> for RecipeResponse {
    fn from(view: RecipeView) -> Self {
        let recipe = view.recipe;
        RecipeResponse {
            id: recipe.id,
            title: recipe.title,
            cover_image: recipe.cover_image,
            ingredients: recipe.ingredients,
            instructions: recipe.instructions,
            created_by: view.creator.map(CreatorResponse::from),
            favorites: recipe.favorites.into_iter().collect(),
            created_at: recipe.created_at,
            updated_at: recipe.updated_at,
        }
    }
}

/// Ids that aren't even well-formed name no recipe.
fn parse_recipe_id(raw: &str) -> Result<RecipeId, ApiError> {
    RecipeId::parse(raw).ok_or(ApiError::NotFound("Recipe not found"))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_recipes,
        list::list_my_recipes,
        list::list_favorite_recipes,
        get::get_recipe,
        create::create_recipe,
        update::update_recipe,
        delete::delete_recipe,
        favorite::toggle_favorite,
    ),
    components(schemas(RecipeResponse, CreatorResponse, form::RecipeFormRequest,))
)]
pub struct ApiDoc;

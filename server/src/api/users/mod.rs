pub mod get;

use crate::AppState;
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /user endpoints
pub fn router() -> Router<AppState> {
    Router::new().route("/user/{id}", get(get::get_user))
}

#[derive(OpenApi)]
#[openapi(paths(get::get_user), components(schemas(get::UserResponse)))]
pub struct ApiDoc;

pub mod login;
pub mod logout;
pub mod signup;

use crate::models::{User, UserId};
use crate::AppState;
use axum::routing::post;
use axum::Router;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

/// Returns the router for /auth endpoints
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup::signup))
        .route("/auth/login", post(login::login))
        .route("/auth/logout", post(logout::logout))
}

/// Returned by signup and login: the account plus a fresh bearer token.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthResponse {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub token: String,
}

impl AuthResponse {
    fn new(user: User, token: String) -> Self {
        AuthResponse {
            id: user.id,
            name: user.name,
            email: user.email,
            token,
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(signup::signup, login::login, logout::logout),
    components(schemas(signup::SignupRequest, login::LoginRequest, AuthResponse))
)]
pub struct ApiDoc;

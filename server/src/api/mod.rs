pub mod auth;
pub mod health;
pub mod json;
pub mod recipes;
pub mod users;

use crate::AppState;
use axum::Router;
use serde::Serialize;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{OpenApi, ToSchema};

/// Shared error response used by all endpoints
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Plain acknowledgement, e.g. after a delete or logout
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        MessageResponse {
            message: message.into(),
        }
    }
}

/// Every API route, still waiting for its state
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(users::router())
        .merge(recipes::router())
}

/// Generate the complete OpenAPI spec by merging all module specs
pub fn openapi() -> utoipa::openapi::OpenApi {
    #[derive(OpenApi)]
    #[openapi(
        info(title = "Cookbook API", description = "Share recipes and keep favorites"),
        components(schemas(ErrorResponse, MessageResponse))
    )]
    struct BaseApi;

    let mut spec = BaseApi::openapi();

    if let Some(components) = spec.components.as_mut() {
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }

    let modules: Vec<utoipa::openapi::OpenApi> = vec![
        health::ApiDoc::openapi(),
        auth::ApiDoc::openapi(),
        users::ApiDoc::openapi(),
        recipes::ApiDoc::openapi(),
    ];

    for module_spec in modules {
        spec.paths.paths.extend(module_spec.paths.paths);

        if let Some(module_components) = module_spec.components {
            if let Some(spec_components) = spec.components.as_mut() {
                spec_components.schemas.extend(module_components.schemas);
            }
        }
    }

    spec
}

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod images;
pub mod models;
pub mod recipes;
pub mod schema;
pub mod state;
pub mod store;
pub mod telemetry;

pub use state::{AppContext, AppState};

use axum::extract::MatchedPath;
use axum::http::Request;
use axum::Router;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::Span;
use utoipa_swagger_ui::SwaggerUi;

/// Build the full application: API routes, stored images, and API docs.
pub fn router(state: AppState, cors: CorsLayer) -> Router {
    let image_files = ServeDir::new(state.recipes.images().root());
    let swagger_ui = SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api::openapi());

    Router::new()
        .merge(api::router())
        .nest_service(images::PUBLIC_PREFIX, image_files)
        .merge(swagger_ui)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    let matched_path = request
                        .extensions()
                        .get::<MatchedPath>()
                        .map(MatchedPath::as_str)
                        .unwrap_or(request.uri().path());

                    // Load balancers poll this constantly
                    if matched_path == "/health" {
                        tracing::trace_span!("http_request")
                    } else {
                        tracing::info_span!(
                            "http_request",
                            method = %request.method(),
                            path = %matched_path,
                        )
                    }
                })
                .on_request(|_request: &Request<_>, _span: &Span| {})
                .on_response(
                    |response: &axum::http::Response<_>, latency: Duration, span: &Span| {
                        if span.metadata().map(|m| m.level()) == Some(&tracing::Level::TRACE) {
                            return;
                        }
                        let status = response.status().as_u16();
                        if status >= 500 {
                            tracing::error!(
                                status = %status,
                                latency_ms = %latency.as_millis(),
                                "request failed with server error"
                            );
                        } else {
                            tracing::info!(
                                status = %status,
                                latency_ms = %latency.as_millis(),
                                "request completed"
                            );
                        }
                    },
                )
                .on_failure(
                    |error: tower_http::classify::ServerErrorsFailureClass,
                     latency: Duration,
                     _span: &Span| {
                        tracing::error!(
                            error = %error,
                            latency_ms = %latency.as_millis(),
                            "request failed"
                        );
                    },
                ),
        )
}

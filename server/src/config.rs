use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

/// Runtime settings, read from the environment (and `.env`, if present).
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Without a database URL the server keeps everything in memory.
    pub database_url: Option<String>,
    pub image_dir: PathBuf,
    /// Allowed CORS origin; any origin when unset.
    pub cors_allow_origin: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: try_load("PORT", 5000),
            database_url: optional("DATABASE_URL"),
            image_dir: optional("IMAGE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("public/images")),
            cors_allow_origin: optional("CORS_ALLOW_ORIGIN"),
        }
    }

    pub fn cors_layer(&self) -> CorsLayer {
        let Some(origin) = self.cors_allow_origin.as_deref() else {
            return CorsLayer::permissive();
        };
        match HeaderValue::from_str(origin) {
            Ok(origin) => CorsLayer::new()
                .allow_origin(origin)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]),
            Err(e) => {
                warn!("Invalid CORS_ALLOW_ORIGIN {origin:?}: {e}, allowing any origin");
                CorsLayer::permissive()
            }
        }
    }
}

fn optional(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn try_load<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    let Some(raw) = optional(key) else {
        info!("{key} not set, using default: {default}");
        return default;
    };
    raw.parse().unwrap_or_else(|e| {
        warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
        default
    })
}

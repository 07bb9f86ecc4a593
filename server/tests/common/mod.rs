//! Common test utilities for API integration tests
#![allow(dead_code)]

use std::sync::Arc;

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use cookbook_server::images::ImageStore;
use cookbook_server::store::memory::MemoryStore;
use cookbook_server::{router, AppContext};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower_http::cors::CorsLayer;

/// Smallest byte sequence that sniffs as PNG.
pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR\0\0\0\x01\0\0\0\x01";

/// A running test server. The image directory lives as long as this does.
pub struct TestApp {
    pub server: TestServer,
    pub images: TempDir,
}

impl TestApp {
    /// Number of files currently in the image directory.
    pub fn stored_images(&self) -> usize {
        std::fs::read_dir(self.images.path()).unwrap().count()
    }
}

/// Create a test server backed by an in-memory store and a scratch image directory
pub fn create_test_server() -> TestApp {
    let images = tempfile::tempdir().expect("Failed to create image dir");
    let state = AppContext::new(
        Arc::new(MemoryStore::new()),
        ImageStore::new(images.path()),
    );

    let app = router(state, CorsLayer::permissive());
    let server = TestServer::new(app).expect("Failed to create test server");

    TestApp { server, images }
}

/// Sign up a user and return (user id, bearer token)
pub async fn signup(server: &TestServer, name: &str, email: &str) -> (String, String) {
    let response = server
        .post("/auth/signup")
        .json(&json!({
            "name": name,
            "email": email,
            "password": "correct horse",
        }))
        .await;
    assert_eq!(response.status_code(), 201, "signup failed: {}", response.text());

    let body: Value = response.json();
    (
        body["id"].as_str().unwrap().to_string(),
        body["token"].as_str().unwrap().to_string(),
    )
}

pub fn png_part() -> Part {
    Part::bytes(PNG_BYTES.to_vec())
        .file_name("cover.png")
        .mime_type("image/png")
}

pub fn recipe_form(title: &str, ingredients: &str, instructions: &str) -> MultipartForm {
    MultipartForm::new()
        .add_text("title", title.to_string())
        .add_text("ingredients", ingredients.to_string())
        .add_text("instructions", instructions.to_string())
}

/// Create a recipe and return its JSON
pub async fn create_recipe(server: &TestServer, token: &str, form: MultipartForm) -> Value {
    let response = server
        .post("/recipe")
        .authorization_bearer(token)
        .multipart(form)
        .await;
    assert_eq!(response.status_code(), 201, "create failed: {}", response.text());
    response.json()
}

//! Tests for signup, login, logout, and public user lookup

mod common;

use axum::body::Bytes;
use axum::http::{header, HeaderValue};
use common::{create_test_server, signup};
use serde_json::{json, Value};

#[tokio::test]
async fn test_health() {
    let app = create_test_server();

    let response = app.server.get("/health").await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["message"], "Server is running");
}

#[tokio::test]
async fn test_signup_returns_account_and_token() {
    let app = create_test_server();

    let response = app
        .server
        .post("/auth/signup")
        .json(&json!({"name": "Ada", "email": "Ada@Example.com", "password": "pw"}))
        .await;

    assert_eq!(response.status_code(), 201);
    let body: Value = response.json();
    assert_eq!(body["name"], "Ada");
    assert_eq!(body["email"], "ada@example.com");
    assert_eq!(body["token"].as_str().unwrap().len(), 64);
    assert!(body.get("passwordHash").is_none());
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_signup_rejects_missing_fields() {
    let app = create_test_server();

    let response = app
        .server
        .post("/auth/signup")
        .json(&json!({"name": "  ", "email": "a@example.com", "password": "pw"}))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"], "Please add all fields");
}

#[tokio::test]
async fn test_malformed_json_gets_an_error_body() {
    let app = create_test_server();

    let response = app
        .server
        .post("/auth/signup")
        .content_type("application/json")
        .bytes(Bytes::from_static(b"{\"name\": \"Ada\","))
        .await;
    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid request body"));

    // Not declared as JSON at all.
    let response = app
        .server
        .post("/auth/login")
        .text("email=ada@example.com")
        .await;
    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_signup_rejects_duplicate_email() {
    let app = create_test_server();
    signup(&app.server, "Ada", "ada@example.com").await;

    let response = app
        .server
        .post("/auth/signup")
        .json(&json!({"name": "Imposter", "email": "ADA@example.com", "password": "pw"}))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"], "User already exists");
}

#[tokio::test]
async fn test_login() {
    let app = create_test_server();
    let (id, _) = signup(&app.server, "Ada", "ada@example.com").await;

    let response = app
        .server
        .post("/auth/login")
        .json(&json!({"email": "ada@example.com", "password": "correct horse"}))
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["id"], id.as_str());

    // The new token works on its own.
    let token = body["token"].as_str().unwrap();
    let response = app
        .server
        .get("/recipe/my")
        .authorization_bearer(token)
        .await;
    assert_eq!(response.status_code(), 200);
}

#[tokio::test]
async fn test_login_failures_look_the_same() {
    let app = create_test_server();
    signup(&app.server, "Ada", "ada@example.com").await;

    for (email, password) in [
        ("ada@example.com", "wrong"),
        ("nobody@example.com", "correct horse"),
    ] {
        let response = app
            .server
            .post("/auth/login")
            .json(&json!({"email": email, "password": password}))
            .await;

        assert_eq!(response.status_code(), 401);
        let body: Value = response.json();
        assert_eq!(body["error"], "Invalid email or password");
    }
}

#[tokio::test]
async fn test_logout_ends_only_that_session() {
    let app = create_test_server();
    let (_, first) = signup(&app.server, "Ada", "ada@example.com").await;
    let second: Value = app
        .server
        .post("/auth/login")
        .json(&json!({"email": "ada@example.com", "password": "correct horse"}))
        .await
        .json();
    let second = second["token"].as_str().unwrap().to_string();

    let response = app
        .server
        .post("/auth/logout")
        .authorization_bearer(&first)
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["message"], "Logged out successfully");

    let response = app
        .server
        .get("/recipe/my")
        .authorization_bearer(&first)
        .await;
    assert_eq!(response.status_code(), 401);
    let body: Value = response.json();
    assert_eq!(body["error"], "Invalid or expired token");

    let response = app
        .server
        .get("/recipe/my")
        .authorization_bearer(&second)
        .await;
    assert_eq!(response.status_code(), 200);
}

#[tokio::test]
async fn test_auth_header_errors() {
    let app = create_test_server();

    let response = app.server.get("/recipe/favorites").await;
    assert_eq!(response.status_code(), 401);
    let body: Value = response.json();
    assert_eq!(body["error"], "Missing Authorization header");

    let response = app
        .server
        .get("/recipe/favorites")
        .add_header(header::AUTHORIZATION, HeaderValue::from_static("Token abc"))
        .await;
    assert_eq!(response.status_code(), 401);
    let body: Value = response.json();
    assert_eq!(body["error"], "Invalid Authorization header format");

    let response = app
        .server
        .get("/recipe/favorites")
        .authorization_bearer("deadbeef")
        .await;
    assert_eq!(response.status_code(), 401);
    let body: Value = response.json();
    assert_eq!(body["error"], "Invalid or expired token");
}

#[tokio::test]
async fn test_get_user_is_public() {
    let app = create_test_server();
    let (id, _) = signup(&app.server, "Ada", "ada@example.com").await;

    let response = app.server.get(&format!("/user/{id}")).await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["name"], "Ada");
    assert_eq!(body["email"], "ada@example.com");
    assert!(body["createdAt"].is_string());
    assert!(body.get("passwordHash").is_none());

    for missing in [
        "/user/not-a-uuid".to_string(),
        format!("/user/{}", uuid::Uuid::new_v4()),
    ] {
        let response = app.server.get(&missing).await;
        assert_eq!(response.status_code(), 404);
        let body: Value = response.json();
        assert_eq!(body["error"], "User not found");
    }
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = create_test_server();

    let response = app.server.get("/api-docs/openapi.json").await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert!(body["paths"]["/recipe/{id}/favorite"]["post"].is_object());
}

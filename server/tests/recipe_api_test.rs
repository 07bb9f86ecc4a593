//! End-to-end tests for the /recipe endpoints

mod common;

use axum_test::multipart::{MultipartForm, Part};
use common::{create_recipe, create_test_server, png_part, recipe_form, signup};
use serde_json::Value;

#[tokio::test]
async fn test_recipe_lifecycle() {
    let app = create_test_server();
    let (alice_id, alice) = signup(&app.server, "Alice", "alice@example.com").await;
    let (bob_id, bob) = signup(&app.server, "Bob", "bob@example.com").await;

    // Create with a cover image.
    let form = recipe_form("Pancakes", "flour, milk, eggs", "Mix and fry.")
        .add_part("coverImage", png_part());
    let created = create_recipe(&app.server, &alice, form).await;
    let id = created["id"].as_str().unwrap().to_string();

    assert_eq!(created["title"], "Pancakes");
    assert_eq!(
        created["ingredients"],
        serde_json::json!(["flour", "milk", "eggs"])
    );
    assert_eq!(created["createdBy"]["id"], alice_id.as_str());
    assert_eq!(created["createdBy"]["name"], "Alice");
    assert_eq!(created["favorites"], serde_json::json!([]));
    let cover = created["coverImage"].as_str().unwrap().to_string();
    assert!(cover.starts_with("/images/coverImage-"));
    assert_eq!(app.stored_images(), 1);

    // The image is served back.
    let response = app.server.get(&cover).await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.as_bytes().as_ref(), common::PNG_BYTES);

    // Bob cannot edit it, and nothing changes.
    let response = app
        .server
        .put(&format!("/recipe/{id}"))
        .authorization_bearer(&bob)
        .multipart(MultipartForm::new().add_text("title", "Mine now"))
        .await;
    assert_eq!(response.status_code(), 401);
    let body: Value = response.json();
    assert_eq!(body["error"], "Not authorized");

    // Bob favorites it.
    let response = app
        .server
        .post(&format!("/recipe/{id}/favorite"))
        .authorization_bearer(&bob)
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["favorites"], serde_json::json!([bob_id]));

    let favorites: Value = app
        .server
        .get("/recipe/favorites")
        .authorization_bearer(&bob)
        .await
        .json();
    assert_eq!(favorites.as_array().unwrap().len(), 1);
    assert_eq!(favorites[0]["id"], id.as_str());

    // Alice replaces the image; the old file goes away.
    let form = MultipartForm::new()
        .add_text("title", "Fluffy Pancakes")
        .add_part("coverImage", png_part());
    let response = app
        .server
        .put(&format!("/recipe/{id}"))
        .authorization_bearer(&alice)
        .multipart(form)
        .await;
    assert_eq!(response.status_code(), 200);
    let updated: Value = response.json();
    assert_eq!(updated["title"], "Fluffy Pancakes");
    assert_eq!(updated["instructions"], "Mix and fry.");
    assert_eq!(updated["ingredients"], created["ingredients"]);
    assert_eq!(updated["favorites"], serde_json::json!([bob_id]));
    assert_ne!(updated["coverImage"], cover.as_str());
    assert_eq!(app.stored_images(), 1);
    assert_eq!(app.server.get(&cover).await.status_code(), 404);

    // Alice deletes it; the record and the file are gone.
    let response = app
        .server
        .delete(&format!("/recipe/{id}"))
        .authorization_bearer(&alice)
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["message"], "Recipe deleted");
    assert_eq!(app.stored_images(), 0);

    let response = app.server.get(&format!("/recipe/{id}")).await;
    assert_eq!(response.status_code(), 404);
    let body: Value = response.json();
    assert_eq!(body["error"], "Recipe not found");

    let favorites: Value = app
        .server
        .get("/recipe/favorites")
        .authorization_bearer(&bob)
        .await
        .json();
    assert_eq!(favorites, serde_json::json!([]));
}

#[tokio::test]
async fn test_listings() {
    let app = create_test_server();
    let (_, alice) = signup(&app.server, "Alice", "alice@example.com").await;
    let (_, bob) = signup(&app.server, "Bob", "bob@example.com").await;

    create_recipe(&app.server, &alice, recipe_form("Soup", "water", "Boil.")).await;
    create_recipe(&app.server, &bob, recipe_form("Toast", "bread", "Toast.")).await;

    // Listing everything needs no login, and comes back oldest first.
    let all: Value = app.server.get("/recipe").await.json();
    let titles: Vec<_> = all
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Soup", "Toast"]);
    assert_eq!(all[1]["createdBy"]["email"], "bob@example.com");

    let mine: Value = app
        .server
        .get("/recipe/my")
        .authorization_bearer(&bob)
        .await
        .json();
    assert_eq!(mine.as_array().unwrap().len(), 1);
    assert_eq!(mine[0]["title"], "Toast");

    assert_eq!(app.server.get("/recipe/my").await.status_code(), 401);
}

#[tokio::test]
async fn test_create_requires_login() {
    let app = create_test_server();

    let response = app
        .server
        .post("/recipe")
        .multipart(recipe_form("Soup", "water", "Boil."))
        .await;

    assert_eq!(response.status_code(), 401);
    let all: Value = app.server.get("/recipe").await.json();
    assert_eq!(all, serde_json::json!([]));
}

#[tokio::test]
async fn test_create_validation() {
    let app = create_test_server();
    let (_, token) = signup(&app.server, "Alice", "alice@example.com").await;

    let cases = [
        (recipe_form("   ", "water", "Boil."), "Please add a title"),
        (recipe_form("Soup", " , ,", "Boil."), "Please add ingredients"),
        (recipe_form("Soup", "water", ""), "Please add instructions"),
    ];
    for (form, message) in cases {
        // An image in a rejected request must never reach the disk.
        let form = form.add_part("coverImage", png_part());
        let response = app
            .server
            .post("/recipe")
            .authorization_bearer(&token)
            .multipart(form)
            .await;

        assert_eq!(response.status_code(), 400);
        let body: Value = response.json();
        assert_eq!(body["error"], message);
    }

    assert_eq!(app.stored_images(), 0);
    let all: Value = app.server.get("/recipe").await.json();
    assert_eq!(all, serde_json::json!([]));
}

#[tokio::test]
async fn test_ingredients_as_repeated_fields() {
    let app = create_test_server();
    let (_, token) = signup(&app.server, "Alice", "alice@example.com").await;

    let form = MultipartForm::new()
        .add_text("title", "Salad")
        .add_text("ingredients[]", " lettuce ")
        .add_text("ingredients[]", "oil, vinegar")
        .add_text("ingredients[]", "")
        .add_text("instructions", "Toss.");
    let created = create_recipe(&app.server, &token, form).await;

    assert_eq!(
        created["ingredients"],
        serde_json::json!(["lettuce", "oil, vinegar"])
    );
    assert_eq!(created["coverImage"], "");
}

#[tokio::test]
async fn test_rejects_non_image_uploads() {
    let app = create_test_server();
    let (_, token) = signup(&app.server, "Alice", "alice@example.com").await;

    let text_file = Part::bytes(b"definitely not a picture".to_vec())
        .file_name("notes.txt")
        .mime_type("text/plain");
    let response = app
        .server
        .post("/recipe")
        .authorization_bearer(&token)
        .multipart(recipe_form("Soup", "water", "Boil.").add_part("coverImage", text_file))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"], "Images only!");
    assert_eq!(app.stored_images(), 0);
}

#[tokio::test]
async fn test_rejects_oversized_uploads() {
    let app = create_test_server();
    let (_, token) = signup(&app.server, "Alice", "alice@example.com").await;

    let mut data = common::PNG_BYTES.to_vec();
    data.resize(5 * 1024 * 1024 + 1, 0);
    let big = Part::bytes(data)
        .file_name("big.png")
        .mime_type("image/png");
    let response = app
        .server
        .post("/recipe")
        .authorization_bearer(&token)
        .multipart(recipe_form("Soup", "water", "Boil.").add_part("coverImage", big))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"], "File too large. Max size is 5MB.");
    assert_eq!(app.stored_images(), 0);
}

#[tokio::test]
async fn test_update_keeps_fields_left_blank() {
    let app = create_test_server();
    let (_, token) = signup(&app.server, "Alice", "alice@example.com").await;
    let created = create_recipe(&app.server, &token, recipe_form("Soup", "water", "Boil.")).await;
    let id = created["id"].as_str().unwrap();

    let form = MultipartForm::new()
        .add_text("title", "")
        .add_text("ingredients", "water, salt")
        .add_text("instructions", "   ");
    let response = app
        .server
        .put(&format!("/recipe/{id}"))
        .authorization_bearer(&token)
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), 200);
    let updated: Value = response.json();
    assert_eq!(updated["title"], "Soup");
    assert_eq!(updated["instructions"], "Boil.");
    assert_eq!(updated["ingredients"], serde_json::json!(["water", "salt"]));
    assert_eq!(updated["createdAt"], created["createdAt"]);
}

#[tokio::test]
async fn test_favorite_toggles_back_off() {
    let app = create_test_server();
    let (_, token) = signup(&app.server, "Alice", "alice@example.com").await;
    let created = create_recipe(&app.server, &token, recipe_form("Soup", "water", "Boil.")).await;
    let path = format!("/recipe/{}/favorite", created["id"].as_str().unwrap());

    let on: Value = app.server.post(&path).authorization_bearer(&token).await.json();
    assert_eq!(on["favorites"].as_array().unwrap().len(), 1);

    let off: Value = app.server.post(&path).authorization_bearer(&token).await.json();
    assert_eq!(off["favorites"], serde_json::json!([]));
}

#[tokio::test]
async fn test_unknown_recipes_are_not_found() {
    let app = create_test_server();
    let (_, token) = signup(&app.server, "Alice", "alice@example.com").await;
    let unknown = uuid::Uuid::new_v4();

    for path in [
        format!("/recipe/{unknown}"),
        "/recipe/not-a-uuid".to_string(),
    ] {
        let response = app.server.get(&path).await;
        assert_eq!(response.status_code(), 404);

        let response = app
            .server
            .delete(&path)
            .authorization_bearer(&token)
            .await;
        assert_eq!(response.status_code(), 404);

        let response = app
            .server
            .post(&format!("{path}/favorite"))
            .authorization_bearer(&token)
            .await;
        assert_eq!(response.status_code(), 404);
    }

    let response = app
        .server
        .put(&format!("/recipe/{unknown}"))
        .authorization_bearer(&token)
        .multipart(MultipartForm::new().add_text("title", "Ghost"))
        .await;
    assert_eq!(response.status_code(), 404);
}

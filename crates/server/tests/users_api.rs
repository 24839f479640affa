//! Router tests for the `/users` endpoints.

#![allow(clippy::unwrap_used)]

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use taskboard_server::services::password;

use common::{GOOD_PASSWORD, TestApp};

// ============================================================================
// Create
// ============================================================================

#[tokio::test]
async fn test_create_then_get_returns_submitted_fields() {
    let app = TestApp::new();
    let created = app.create_user("f001", "Fulano", "fulano@example.com").await;
    assert_eq!(
        created,
        json!({ "id": "f001", "name": "Fulano", "email": "fulano@example.com" })
    );

    let response = app.get("/users/f001").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.labelled("found user"), created);
}

#[tokio::test]
async fn test_password_is_hashed_and_never_returned() {
    let app = TestApp::new();
    let created = app.create_user("f001", "Fulano", "fulano@example.com").await;
    assert!(created.get("password").is_none());

    let hash = app.password_hash("f001").unwrap();
    assert_ne!(hash, GOOD_PASSWORD);
    assert!(hash.starts_with("$argon2"));
    assert!(password::verify_password(GOOD_PASSWORD, &hash));

    let listed = app.get("/users").await.labelled("registered users");
    assert!(listed[0].get("password").is_none());
}

#[tokio::test]
async fn test_duplicate_id_is_rejected_and_one_record_remains() {
    let app = TestApp::new();
    app.create_user("f001", "Fulano", "fulano@example.com").await;

    let response = app
        .post(
            "/users",
            json!({
                "id": "f001",
                "name": "Someone Else",
                "email": "else@example.com",
                "password": GOOD_PASSWORD,
            }),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body, "a user with id 'f001' already exists");
    assert_eq!(app.user_count(), 1);
}

#[tokio::test]
async fn test_duplicate_email_is_rejected() {
    let app = TestApp::new();
    app.create_user("f001", "Fulano", "shared@example.com").await;

    let response = app
        .post(
            "/users",
            json!({
                "id": "f002",
                "name": "Beltrano",
                "email": "shared@example.com",
                "password": GOOD_PASSWORD,
            }),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body,
        "a user with email 'shared@example.com' already exists"
    );
    assert_eq!(app.user_count(), 1);
}

#[tokio::test]
async fn test_password_policy() {
    let app = TestApp::new();

    let weak = app
        .post(
            "/users",
            json!({ "id": "f001", "name": "Fulano", "email": "a@example.com", "password": "abcdefgh" }),
        )
        .await;
    assert_eq!(weak.status, StatusCode::BAD_REQUEST);
    assert!(weak.body.starts_with("'password' must be 8 to 12 characters long"));

    let too_long = app
        .post(
            "/users",
            json!({ "id": "f001", "name": "Fulano", "email": "a@example.com", "password": "Abcdefghij1!x" }),
        )
        .await;
    assert_eq!(too_long.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.user_count(), 0);

    app.create_user("f001", "Fulano", "a@example.com").await;
}

#[tokio::test]
async fn test_only_first_invalid_field_is_reported() {
    let app = TestApp::new();
    let response = app
        .post(
            "/users",
            json!({ "id": "f1", "name": "Al", "email": 7, "password": "weak" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body, "'id' must be at least 4 characters long");
}

#[tokio::test]
async fn test_field_types_are_checked() {
    let app = TestApp::new();

    let response = app
        .post(
            "/users",
            json!({ "id": 1234, "name": "Fulano", "email": "a@example.com", "password": GOOD_PASSWORD }),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body, "'id' must be a string");

    let response = app
        .post(
            "/users",
            json!({ "id": "f001", "name": "Fulano", "password": GOOD_PASSWORD }),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body, "'email' must be a string");
}

#[tokio::test]
async fn test_email_format_is_not_checked() {
    let app = TestApp::new();
    let created = app.create_user("f001", "Fulano", "not-an-email").await;
    assert_eq!(created["email"], "not-an-email");
}

#[tokio::test]
async fn test_repeated_failed_create_is_idempotent() {
    let app = TestApp::new();
    let body = json!({ "id": "f001", "name": "Fu", "email": "a@example.com", "password": GOOD_PASSWORD });

    let first = app.post("/users", body.clone()).await;
    let second = app.post("/users", body).await;

    assert_eq!(first.status, StatusCode::BAD_REQUEST);
    assert_eq!(first.status, second.status);
    assert_eq!(first.body, second.body);
    assert_eq!(app.user_count(), 0);
}

#[tokio::test]
async fn test_malformed_bodies_are_validation_errors() {
    let app = TestApp::new();

    let broken = app
        .send_raw(Method::POST, "/users", "application/json", "{\"id\": ")
        .await;
    assert_eq!(broken.status, StatusCode::BAD_REQUEST);
    assert!(broken.body.starts_with("request body is not valid JSON"));

    let array = app.post("/users", json!(["f001"])).await;
    assert_eq!(array.status, StatusCode::BAD_REQUEST);
    assert_eq!(array.body, "request body must be a JSON object");

    let no_content_type = app
        .send_raw(Method::POST, "/users", "text/plain", "{}")
        .await;
    assert_eq!(no_content_type.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.user_count(), 0);
}

// ============================================================================
// Read
// ============================================================================

#[tokio::test]
async fn test_list_users_in_id_order() {
    let app = TestApp::new();
    assert_eq!(app.get("/users").await.labelled("registered users"), json!([]));

    app.create_user("f002", "Beltrano", "b@example.com").await;
    app.create_user("f001", "Fulano", "f@example.com").await;

    let response = app.get("/users").await;
    assert_eq!(response.status, StatusCode::OK);
    let users = response.labelled("registered users");
    let ids: Vec<&str> = users
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["f001", "f002"]);
}

#[tokio::test]
async fn test_get_missing_user_is_not_found() {
    let app = TestApp::new();
    let response = app.get("/users/f404").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body, "no user with id 'f404' exists");
}

#[tokio::test]
async fn test_search_by_name() {
    let app = TestApp::new();
    app.create_user("f001", "Maria Silva", "maria@example.com").await;
    app.create_user("f002", "Mario Souza", "mario@example.com").await;
    app.create_user("f003", "Joana", "joana@example.com").await;

    let response = app.get("/users/search?q=MARI").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.labelled("search result").as_array().unwrap().len(), 2);

    let response = app.get("/users/search?q=zzz").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.labelled("search result"), json!([]));
}

#[tokio::test]
async fn test_search_requires_a_term() {
    let app = TestApp::new();

    for uri in ["/users/search?q=", "/users/search"] {
        let response = app.get(uri).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(response.body, "the search term 'q' must not be empty");
    }
}

// ============================================================================
// Delete
// ============================================================================

#[tokio::test]
async fn test_delete_user() {
    let app = TestApp::new();
    let created = app.create_user("f001", "Fulano", "fulano@example.com").await;

    let response = app.delete("/users/f001").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.labelled("deleted user"), created);
    assert_eq!(app.user_count(), 0);

    let again = app.delete("/users/f001").await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_requires_f_prefix_even_when_user_exists() {
    let app = TestApp::new();
    app.create_user("a001", "Fulano", "fulano@example.com").await;

    let existing = app.delete("/users/a001").await;
    assert_eq!(existing.status, StatusCode::NOT_FOUND);
    assert_eq!(app.user_count(), 1);

    let missing = app.delete("/users/x999").await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(existing.body, "user 'a001' cannot be deleted: only ids starting with 'f' can be deleted");
}

// ============================================================================
// Store failures
// ============================================================================

#[tokio::test]
async fn test_ping() {
    let app = TestApp::new();
    let response = app.get("/ping").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.labelled("message"), json!("Pong!"));

    let health = app.get("/health").await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body, "ok");
}

#[tokio::test]
async fn test_unavailable_store_is_an_unexpected_error() {
    let app = TestApp::new();
    app.store.set_unavailable(true);

    for uri in ["/ping", "/users", "/users/f001", "/users/search?q=a"] {
        let response = app.get(uri).await;
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
        assert_eq!(response.body, "Unexpected error");
    }

    // Liveness never touches the store.
    assert_eq!(app.get("/health").await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_validation_runs_before_store_access() {
    let app = TestApp::new();
    app.store.set_unavailable(true);

    let response = app
        .post("/users", json!({ "id": "f1", "name": "Fulano" }))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

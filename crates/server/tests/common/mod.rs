//! Shared harness for the router tests.
//!
//! Every test gets a fresh [`MemoryStore`] behind the real router, so
//! requests run through the same extractors, handlers and error envelope the
//! server binary uses.

#![allow(dead_code, clippy::unwrap_used, clippy::missing_panics_doc)]

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use taskboard_core::UserId;
use taskboard_server::db::MemoryStore;
use taskboard_server::state::AppState;

/// A password that satisfies the composition policy.
pub const GOOD_PASSWORD: &str = "Abcdefg1!";

/// Router plus direct access to its store.
pub struct TestApp {
    pub store: Arc<MemoryStore>,
    router: Router,
}

/// Status and raw body of one response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: String,
}

impl TestResponse {
    /// Parse the body as JSON.
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body)
            .unwrap_or_else(|e| panic!("body is not JSON ({e}): {}", self.body))
    }

    /// The value under the single success label, checking the label.
    pub fn labelled(&self, label: &str) -> Value {
        let body = self.json();
        let object = body.as_object().unwrap();
        assert_eq!(object.len(), 1, "envelope must carry one key: {body}");
        object
            .get(label)
            .cloned()
            .unwrap_or_else(|| panic!("missing label '{label}' in {body}"))
    }
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let router = taskboard_server::app(AppState::new(store.clone()));
        Self { store, router }
    }

    /// Send a request with an optional JSON body.
    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();
        self.dispatch(request).await
    }

    /// Send a raw body with the given content type.
    pub async fn send_raw(
        &self,
        method: Method,
        uri: &str,
        content_type: &str,
        body: &str,
    ) -> TestResponse {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(body.to_owned()))
            .unwrap();
        self.dispatch(request).await
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> TestResponse {
        self.send(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send(Method::DELETE, uri, None).await
    }

    /// Create a user and assert it was accepted.
    pub async fn create_user(&self, id: &str, name: &str, email: &str) -> Value {
        let response = self
            .post(
                "/users",
                serde_json::json!({
                    "id": id,
                    "name": name,
                    "email": email,
                    "password": GOOD_PASSWORD,
                }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.labelled("created user")
    }

    /// Create a task and assert it was accepted.
    pub async fn create_task(&self, id: &str, title: &str, description: &str) -> Value {
        let response = self
            .post(
                "/tasks",
                serde_json::json!({
                    "id": id,
                    "title": title,
                    "description": description,
                }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.labelled("created task")
    }

    pub fn user_count(&self) -> usize {
        self.store.user_count().unwrap()
    }

    pub fn password_hash(&self, id: &str) -> Option<String> {
        self.store.password_hash(&UserId::new(id)).unwrap()
    }

    async fn dispatch(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        TestResponse {
            status,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }
}

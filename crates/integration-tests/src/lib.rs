//! Integration tests for the task board server.
//!
//! These tests talk HTTP to a server that is already running against a
//! migrated `PostgreSQL` database. They are `#[ignore]`d by default.
//!
//! # Running Tests
//!
//! ```bash
//! # Prepare the schema and start the server
//! cargo run -p taskboard-cli -- migrate
//! cargo run -p taskboard-server
//!
//! # Run the ignored tests
//! cargo test -p taskboard-integration-tests -- --ignored
//! ```
//!
//! # Environment Variables
//!
//! - `TASKBOARD_BASE_URL` - Server address (default `http://localhost:3003`)
//!
//! Every test uses fresh random ids, so runs do not collide with each other
//! or with seeded data.

use reqwest::Client;
use uuid::Uuid;

/// A password that satisfies the composition policy.
pub const GOOD_PASSWORD: &str = "Abcdefg1!";

/// Base URL for the API (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("TASKBOARD_BASE_URL").unwrap_or_else(|_| "http://localhost:3003".to_string())
}

/// Plain HTTP client for the tests.
///
/// # Panics
///
/// Panics if the client cannot be built.
#[must_use]
#[allow(clippy::expect_used)]
pub fn client() -> Client {
    Client::builder()
        .build()
        .expect("Failed to create HTTP client")
}

/// A fresh id starting with `prefix`, long enough for every id rule.
#[must_use]
pub fn unique_id(prefix: char) -> String {
    let suffix: String = Uuid::new_v4().simple().to_string().chars().take(11).collect();
    format!("{prefix}{suffix}")
}

/// A fresh email address.
#[must_use]
pub fn unique_email() -> String {
    format!("it-{}@example.com", Uuid::new_v4().simple())
}

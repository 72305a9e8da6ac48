//! Shared helpers for Inventory Hub integration tests.
//!
//! These tests exercise a running server over HTTP. They require:
//! - A running `PostgreSQL` database with migrations applied
//! - The server running (cargo run -p inventory-hub-server)
//!
//! All tests are `#[ignore]`d by default; run them with
//! `cargo test -p inventory-hub-integration-tests -- --ignored`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use reqwest::Client;

/// Base URL for the server (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("INVENTORY_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Create an HTTP client that keeps session cookies across requests.
///
/// # Panics
///
/// Panics if the client cannot be constructed.
#[must_use]
pub fn cookie_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Sign up a throwaway account and leave its session on the client.
///
/// Uses a random email so parallel test runs never collide.
pub async fn sign_up(client: &Client) -> String {
    let email = format!("test-{}@example.com", uuid::Uuid::new_v4());
    let resp = client
        .post(format!("{}/auth/register", base_url()))
        .form(&[
            ("email", email.as_str()),
            ("password", "integration-test-pw"),
            ("password_confirm", "integration-test-pw"),
        ])
        .send()
        .await
        .expect("Failed to sign up");

    assert!(resp.status().is_success() || resp.status().is_redirection());
    email
}

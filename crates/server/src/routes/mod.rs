//! HTTP route handlers for the inventory server.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                        - Inventory dashboard (requires auth)
//! GET  /health                  - Liveness check
//! GET  /health/ready            - Readiness check
//!
//! # Products (HTMX fragments unless noted)
//! GET  /products/panel          - Stats + table fragment (search-aware)
//! GET  /products/live           - SSE change feed for the canonical list
//! GET  /products/new            - Blank modal form fragment
//! POST /products                - Create product
//! GET  /products/{id}/edit      - Pre-filled modal form fragment
//! POST /products/{id}           - Update product
//! DELETE /products/{id}         - Delete product (confirmed client-side)
//!
//! # Auth
//! GET  /auth/login              - Sign-in page
//! POST /auth/login              - Email/password sign-in
//! GET  /auth/register           - Sign-up page
//! POST /auth/register           - Email/password sign-up
//! POST /auth/logout             - Sign-out
//!
//! # Google OAuth (federated sign-in)
//! GET  /auth/google/login       - Redirect to Google consent page
//! GET  /auth/google/callback    - Handle OAuth callback
//! ```

pub mod auth;
pub mod google_auth;
pub mod inventory;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", post(auth::logout))
        // Google federated sign-in
        .route("/google/login", get(google_auth::login))
        .route("/google/callback", get(google_auth::callback))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(inventory::create))
        .route("/panel", get(inventory::panel))
        .route("/live", get(inventory::live))
        .route("/new", get(inventory::new_form))
        .route("/{id}/edit", get(inventory::edit_form))
        .route(
            "/{id}",
            post(inventory::update).delete(inventory::delete),
        )
}

/// Create all routes for the server.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(inventory::dashboard))
        .nest("/products", product_routes())
        .nest("/auth", auth_routes())
}

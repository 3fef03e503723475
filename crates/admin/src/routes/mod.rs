//! HTTP route handlers for the admin site.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Product list (requires auth)
//! GET  /health                 - Health check
//!
//! # Auth
//! GET  /auth/login             - Login page
//! POST /auth/login             - Login action
//! POST /auth/logout            - Logout action
//!
//! # Products (require auth)
//! GET  /products/new           - New product form
//! POST /products               - Create product (multipart, image upload)
//! POST /products/{id}/delete   - Delete product
//! ```

pub mod auth;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Create all routes for the admin site.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Product management
        .route("/", get(products::index))
        .route("/products/new", get(products::new_form))
        .route("/products", post(products::create))
        .route("/products/{id}/delete", post(products::delete))
        // Auth routes
        .nest("/auth", auth_routes())
}

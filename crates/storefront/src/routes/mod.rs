//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /health                 - Health check
//!
//! # Products
//! GET  /products               - Product listing (optional ?category= filter)
//!
//! # Wishlist (HTMX fragments)
//! GET  /wishlist               - Wishlist page
//! POST /wishlist/toggle        - Toggle membership (returns heart fragment)
//! POST /wishlist/remove        - Remove item (card deleted client-side)
//! POST /wishlist/clear         - Empty the wishlist
//! GET  /wishlist/count         - Wishlist count badge (fragment)
//!
//! # Misc
//! GET  /contact                - Contact page
//! POST /newsletter/subscribe   - Newsletter signup (fragment)
//! ```

pub mod contact;
pub mod home;
pub mod newsletter;
pub mod products;
pub mod wishlist;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the wishlist routes router.
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(wishlist::show))
        .route("/toggle", post(wishlist::toggle))
        .route("/remove", post(wishlist::remove))
        .route("/clear", post(wishlist::clear))
        .route("/count", get(wishlist::count))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Product listing
        .route("/products", get(products::index))
        // Wishlist routes
        .nest("/wishlist", wishlist_routes())
        // Contact page
        .route("/contact", get(contact::show))
        // Newsletter signup
        .route("/newsletter/subscribe", post(newsletter::subscribe))
}

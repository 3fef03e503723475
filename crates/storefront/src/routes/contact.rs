//! Contact page route handler.
//!
//! A static page: phone, Instagram, and the store location. Orders are
//! placed over DM or phone, so there is no checkout flow to link to.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;
use tower_sessions::Session;
use tracing::instrument;

use crate::filters;
use crate::wishlist::{SessionSlot, WishlistManager};

/// Store phone number, shown verbatim and used for the tel: link.
pub const PHONE: &str = "+91 6304-776448";

/// Store Instagram handle.
pub const INSTAGRAM_HANDLE: &str = "@infinity_vibe.1";

/// Store Instagram profile URL.
pub const INSTAGRAM_URL: &str = "https://www.instagram.com/infinity_vibe.1";

/// Google Maps link for the physical store.
pub const MAPS_URL: &str = "https://maps.app.goo.gl/Vq5gRkzQ2kDLt2SB9";

/// Contact page template.
#[derive(Template, WebTemplate)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    pub phone: &'static str,
    pub instagram_handle: &'static str,
    pub instagram_url: &'static str,
    pub maps_url: &'static str,
    pub wishlist_count: usize,
}

/// Display the contact page.
#[instrument(skip(session))]
pub async fn show(session: Session) -> impl IntoResponse {
    let manager = WishlistManager::load(SessionSlot::new(session)).await;

    ContactTemplate {
        phone: PHONE,
        instagram_handle: INSTAGRAM_HANDLE,
        instagram_url: INSTAGRAM_URL,
        maps_url: MAPS_URL,
        wishlist_count: manager.len(),
    }
}

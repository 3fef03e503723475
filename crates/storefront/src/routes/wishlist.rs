//! Wishlist route handlers.
//!
//! The page render runs a full reconciliation pass (fetch restricted to the
//! current identifier set, intersected at completion). Mutations are HTMX
//! fragments: toggling returns the heart fragment, removal relies on the
//! client deleting the card optimistically while the server commits the set
//! change and triggers a count refresh.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{AppendHeaders, IntoResponse},
    Form,
};
use infinity_vibe_core::ProductId;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::filters;
use crate::state::AppState;
use crate::wishlist::{refresh, SessionSlot, ViewState, WishlistManager, WishlistView};

use super::products::ProductCardView;

/// Wishlist mutation form data.
#[derive(Debug, Deserialize)]
pub struct WishlistForm {
    pub product_id: String,
}

/// Wishlist page template.
#[derive(Template, WebTemplate)]
#[template(path = "wishlist/show.html")]
pub struct WishlistShowTemplate {
    pub products: Vec<ProductCardView>,
    pub error: Option<String>,
    pub wishlist_count: usize,
}

/// Heart button fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/wishlist_heart.html")]
pub struct WishlistHeartTemplate {
    pub product_id: String,
    pub liked: bool,
}

/// Wishlist count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/wishlist_count.html")]
pub struct WishlistCountTemplate {
    pub wishlist_count: usize,
}

/// Display the wishlist page.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let manager = WishlistManager::load(SessionSlot::new(session)).await;

    let mut view = WishlistView::new();
    refresh(&mut view, &manager, state.catalog()).await;

    let (products, error) = match view.state() {
        ViewState::Ready(products) => (
            products
                .iter()
                .map(|p| ProductCardView::from_product(p, true))
                .collect(),
            None,
        ),
        ViewState::Error(message) => (Vec::new(), Some(message.clone())),
        // The refresh above always completes before rendering.
        ViewState::Loading => (Vec::new(), None),
    };

    WishlistShowTemplate {
        products,
        error,
        wishlist_count: manager.len(),
    }
}

/// Toggle a product's wishlist membership (HTMX).
///
/// Returns the heart fragment reflecting the new state plus a
/// `wishlist-updated` trigger so count badges refresh.
#[instrument(skip(session), fields(product_id = %form.product_id))]
pub async fn toggle(
    session: Session,
    Form(form): Form<WishlistForm>,
) -> Result<impl IntoResponse> {
    if form.product_id.is_empty() {
        return Err(AppError::BadRequest("product_id is required".to_string()));
    }

    let mut manager = WishlistManager::load(SessionSlot::new(session)).await;
    let liked = manager.toggle(ProductId::from(form.product_id.clone())).await;

    Ok((
        AppendHeaders([("HX-Trigger", "wishlist-updated")]),
        WishlistHeartTemplate {
            product_id: form.product_id,
            liked,
        },
    ))
}

/// Remove a product from the wishlist (HTMX).
///
/// The card is deleted client-side before this response lands (optimistic
/// removal); the committed set change makes the next full render agree.
/// Removing an id that is already absent is a no-op.
#[instrument(skip(session), fields(product_id = %form.product_id))]
pub async fn remove(
    session: Session,
    Form(form): Form<WishlistForm>,
) -> Result<impl IntoResponse> {
    if form.product_id.is_empty() {
        return Err(AppError::BadRequest("product_id is required".to_string()));
    }

    let mut manager = WishlistManager::load(SessionSlot::new(session)).await;
    manager.remove(&ProductId::from(form.product_id)).await;

    Ok((
        AppendHeaders([("HX-Trigger", "wishlist-updated")]),
        WishlistCountTemplate {
            wishlist_count: manager.len(),
        },
    ))
}

/// Empty the wishlist (HTMX).
#[instrument(skip(session))]
pub async fn clear(session: Session) -> impl IntoResponse {
    let mut manager = WishlistManager::load(SessionSlot::new(session)).await;
    manager.clear().await;

    (
        AppendHeaders([("HX-Trigger", "wishlist-updated")]),
        WishlistCountTemplate { wishlist_count: 0 },
    )
}

/// Get the wishlist count badge (HTMX).
#[instrument(skip(session))]
pub async fn count(session: Session) -> impl IntoResponse {
    let manager = WishlistManager::load(SessionSlot::new(session)).await;

    WishlistCountTemplate {
        wishlist_count: manager.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: &str) -> ProductCardView {
        ProductCardView {
            id: id.to_string(),
            name: format!("Product {id}"),
            price: "₹499".to_string(),
            image: format!("https://cdn.example/{id}.jpg"),
            badge: None,
            category: "Tees".to_string(),
            liked: true,
        }
    }

    #[test]
    fn test_show_template_pluralizes_item_count() {
        let page = WishlistShowTemplate {
            products: vec![card("p1"), card("p2")],
            error: None,
            wishlist_count: 2,
        }
        .render()
        .expect("render wishlist page");

        assert!(page.contains("2 items"));
        assert!(page.contains("card-p1"));
        assert!(page.contains("card-p2"));
    }

    #[test]
    fn test_show_template_singular_item_count() {
        let page = WishlistShowTemplate {
            products: vec![card("p1")],
            error: None,
            wishlist_count: 1,
        }
        .render()
        .expect("render wishlist page");

        assert!(page.contains("1 item"));
        assert!(!page.contains("1 items"));
    }
}

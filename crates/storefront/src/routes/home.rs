//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tower_sessions::Session;
use tracing::instrument;

use crate::filters;
use crate::state::AppState;
use crate::wishlist::{SessionSlot, WishlistManager};

use super::contact::{INSTAGRAM_HANDLE, INSTAGRAM_URL};
use super::products::ProductCardView;

/// Number of catalog records shown in the featured grid.
const FEATURED_COUNT: usize = 4;

/// Image tiles for the Instagram strip, linking out to the profile.
fn get_instagram_images() -> Vec<&'static str> {
    vec![
        "https://images.unsplash.com/photo-1635650805015-2fa50682873a?q=80&w=600&fit=crop",
        "https://images.unsplash.com/photo-1645997098653-ed4519760b10?q=80&w=600&fit=crop",
        "https://images.unsplash.com/photo-1759933318666-97a7e86c4d76?q=80&w=600&fit=crop",
        "https://images.unsplash.com/photo-1641137806473-5fe07dd62d63?q=80&w=600&fit=crop",
        "https://images.unsplash.com/flagged/photo-1553965860-a53f9a484a3b?q=80&w=600&fit=crop",
        "https://images.unsplash.com/photo-1601071824666-dc1fb5c6169d?q=80&w=600&fit=crop",
    ]
}

/// A customer review for display on the homepage.
#[derive(Clone)]
pub struct ReviewView {
    pub reviewer_name: String,
    pub rating: usize,
    pub content: String,
}

/// Static reviews for the homepage.
fn get_featured_reviews() -> Vec<ReviewView> {
    vec![
        ReviewView {
            reviewer_name: "Vijay S.".to_string(),
            rating: 5,
            content: "The fit is insane. Pure quality.".to_string(),
        },
        ReviewView {
            reviewer_name: "Tharun kumar K.".to_string(),
            rating: 5,
            content: "Minimal. Bold. Perfect.".to_string(),
        },
        ReviewView {
            reviewer_name: "Zubair".to_string(),
            rating: 5,
            content: "Feels luxury. Worth every penny.".to_string(),
        },
    ]
}

/// A "why choose us" selling point.
#[derive(Clone)]
pub struct SellingPoint {
    pub title: String,
    pub description: String,
}

fn get_selling_points() -> Vec<SellingPoint> {
    vec![
        SellingPoint {
            title: "Premium Quality Fabrics".to_string(),
            description: "Sourced from the finest materials worldwide".to_string(),
        },
        SellingPoint {
            title: "Limited Edition Drops".to_string(),
            description: "Exclusive pieces, never mass-produced".to_string(),
        },
        SellingPoint {
            title: "Shipping & Delivery".to_string(),
            description: "Coming soon for online orders".to_string(),
        },
        SellingPoint {
            title: "Returns & Exchanges".to_string(),
            description: "Coming soon with flexible options".to_string(),
        },
    ]
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    /// Featured collection (first few catalog records).
    pub featured: Vec<ProductCardView>,
    /// Inline error strip when the featured fetch fails.
    pub featured_error: Option<String>,
    /// Featured customer reviews.
    pub reviews: Vec<ReviewView>,
    /// "Why choose us" selling points.
    pub selling_points: Vec<SellingPoint>,
    /// Image tiles for the Instagram strip.
    pub instagram_images: Vec<&'static str>,
    pub instagram_handle: &'static str,
    pub instagram_url: &'static str,
    pub wishlist_count: usize,
}

/// Display the home page.
///
/// A failed catalog fetch degrades to an inline message in the featured
/// section; the marketing sections always render.
#[instrument(skip(state, session))]
pub async fn home(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let manager = WishlistManager::load(SessionSlot::new(session)).await;

    let (featured, featured_error) = match state.catalog().fetch_all().await {
        Ok(products) => (
            products
                .iter()
                .take(FEATURED_COUNT)
                .map(|p| ProductCardView::from_product(p, manager.contains(&p.id)))
                .collect(),
            None,
        ),
        Err(e) => {
            tracing::error!(error = %e, "failed to fetch featured products");
            (
                Vec::new(),
                Some("Failed to load featured products.".to_string()),
            )
        }
    };

    HomeTemplate {
        featured,
        featured_error,
        reviews: get_featured_reviews(),
        selling_points: get_selling_points(),
        instagram_images: get_instagram_images(),
        instagram_handle: INSTAGRAM_HANDLE,
        instagram_url: INSTAGRAM_URL,
        wishlist_count: manager.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_renders_brand_story_and_instagram_strip() {
        let page = HomeTemplate {
            featured: Vec::new(),
            featured_error: None,
            reviews: get_featured_reviews(),
            selling_points: get_selling_points(),
            instagram_images: get_instagram_images(),
            instagram_handle: INSTAGRAM_HANDLE,
            instagram_url: INSTAGRAM_URL,
            wishlist_count: 0,
        }
        .render()
        .expect("render home page");

        assert!(page.contains("THIS IS MORE THAN FASHION."));
        assert!(page.contains("Wear who you are."));
        assert!(page.contains("#WEARINFINITYVIBE"));
        assert!(page.contains(INSTAGRAM_URL));
        assert_eq!(page.matches("instagram-tile").count(), 6);
    }
}

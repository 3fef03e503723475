//! Product catalog route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use infinity_vibe_core::Product;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::filters;
use crate::state::AppState;
use crate::wishlist::{SessionSlot, WishlistManager};

/// Category chip shown above the grid when no filter is active.
pub const ALL_CATEGORIES: &str = "All";

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: String,
    pub name: String,
    pub price: String,
    pub image: String,
    pub badge: Option<String>,
    pub category: String,
    /// Whether the visitor's wishlist contains this product.
    pub liked: bool,
}

impl ProductCardView {
    #[must_use]
    pub fn from_product(product: &Product, liked: bool) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            price: product.price.clone(),
            image: product.image.clone(),
            badge: product.badge.clone(),
            category: product.category.clone(),
            liked,
        }
    }
}

/// Category filter chip.
#[derive(Clone)]
pub struct CategoryChip {
    pub name: String,
    pub selected: bool,
}

/// Category filter query parameters.
#[derive(Debug, Deserialize)]
pub struct CategoryQuery {
    pub category: Option<String>,
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub products: Vec<ProductCardView>,
    pub categories: Vec<CategoryChip>,
    pub error: Option<String>,
    pub wishlist_count: usize,
}

/// Derive the filter chips from the fetched records: "All" first, then each
/// category in first-seen order.
fn derive_categories(products: &[Product], selected: &str) -> Vec<CategoryChip> {
    let mut chips = vec![CategoryChip {
        name: ALL_CATEGORIES.to_string(),
        selected: selected == ALL_CATEGORIES,
    }];

    for product in products {
        if !chips.iter().any(|c| c.name == product.category) {
            chips.push(CategoryChip {
                name: product.category.clone(),
                selected: product.category == selected,
            });
        }
    }

    chips
}

/// Display the product listing page, optionally filtered by category.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<CategoryQuery>,
) -> impl IntoResponse {
    let manager = WishlistManager::load(SessionSlot::new(session)).await;
    let selected = query
        .category
        .unwrap_or_else(|| ALL_CATEGORIES.to_string());

    match state.catalog().fetch_all().await {
        Ok(all) => {
            let categories = derive_categories(&all, &selected);
            let products = all
                .iter()
                .filter(|p| selected == ALL_CATEGORIES || p.category == selected)
                .map(|p| ProductCardView::from_product(p, manager.contains(&p.id)))
                .collect();

            ProductsIndexTemplate {
                products,
                categories,
                error: None,
                wishlist_count: manager.len(),
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to load products");
            ProductsIndexTemplate {
                products: Vec::new(),
                categories: Vec::new(),
                error: Some("Failed to load products.".to_string()),
                wishlist_count: manager.len(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use infinity_vibe_core::ProductId;

    fn product(id: &str, category: &str) -> Product {
        Product {
            id: ProductId::from(id),
            name: format!("Product {id}"),
            price: "₹499".to_string(),
            image: format!("https://cdn.example/{id}.jpg"),
            badge: None,
            category: category.to_string(),
        }
    }

    #[test]
    fn test_derive_categories_first_seen_order() {
        let products = vec![
            product("p1", "Tees"),
            product("p2", "Hoodies"),
            product("p3", "Tees"),
        ];

        let chips = derive_categories(&products, "Hoodies");
        let names: Vec<&str> = chips.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["All", "Tees", "Hoodies"]);
        assert!(chips.iter().any(|c| c.name == "Hoodies" && c.selected));
        assert!(chips.iter().all(|c| c.name == "Hoodies" || !c.selected));
    }

    #[test]
    fn test_derive_categories_empty_catalog() {
        let chips = derive_categories(&[], ALL_CATEGORIES);
        assert_eq!(chips.len(), 1);
        assert!(chips.first().is_some_and(|c| c.selected));
    }
}

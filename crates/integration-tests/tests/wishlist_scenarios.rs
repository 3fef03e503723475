//! End-to-end wishlist scenarios over real HTTP.
//!
//! Each test spins up the in-process mock document store, points a real
//! `CatalogClient` at it, and drives the wishlist manager and view exactly
//! the way the page handlers do.

use infinity_vibe_core::ProductId;
use infinity_vibe_integration_tests::{MockCatalog, product_doc};
use infinity_vibe_storefront::catalog::CatalogClient;
use infinity_vibe_storefront::wishlist::{
    MemorySlot, ViewState, WishlistManager, WishlistView, refresh,
};

#[tokio::test]
async fn test_empty_wishlist_renders_without_touching_the_catalog() {
    let mock = MockCatalog::spawn(vec![product_doc("p1", "Tee", "₹499", "Tees", "")]).await;
    let client = CatalogClient::new(&mock.config).expect("client builds");

    let manager = WishlistManager::load(MemorySlot::new()).await;
    let mut view = WishlistView::new();
    refresh(&mut view, &manager, &client).await;

    assert_eq!(view.state(), &ViewState::Ready(Vec::new()));
    assert_eq!(mock.hits(), 0, "no request may reach the store");
}

#[tokio::test]
async fn test_single_item_wishlist_renders_the_fetched_product() {
    let mock = MockCatalog::spawn(vec![
        product_doc("p1", "Oversized Tee", "₹499", "Tees", "NEW DROP"),
        product_doc("p2", "Cargo Pants", "₹1299", "Bottoms", ""),
    ])
    .await;
    let client = CatalogClient::new(&mock.config).expect("client builds");

    let manager = WishlistManager::load(MemorySlot::with_raw("[\"p1\"]")).await;
    let mut view = WishlistView::new();
    refresh(&mut view, &manager, &client).await;

    let ViewState::Ready(products) = view.state() else {
        panic!("expected Ready, got {:?}", view.state());
    };
    assert_eq!(products.len(), 1);
    let product = products.first().expect("one product");
    assert_eq!(product.id, ProductId::from("p1"));
    assert_eq!(product.name, "Oversized Tee");
    assert_eq!(product.price, "₹499");
    assert_eq!(product.badge.as_deref(), Some("NEW DROP"));
    assert_eq!(mock.hits(), 1);
}

#[tokio::test]
async fn test_fetch_failure_shows_error_and_no_partial_list() {
    let mock = MockCatalog::spawn_failing(500).await;
    let client = CatalogClient::new(&mock.config).expect("client builds");

    let manager = WishlistManager::load(MemorySlot::with_raw("[\"p1\",\"p2\"]")).await;
    let mut view = WishlistView::new();
    refresh(&mut view, &manager, &client).await;

    assert!(matches!(view.state(), ViewState::Error(_)));
}

#[tokio::test]
async fn test_identifier_missing_from_catalog_is_silently_dropped() {
    // p9 was liked before the product was removed from the catalog.
    let mock = MockCatalog::spawn(vec![product_doc("p1", "Tee", "₹499", "Tees", "")]).await;
    let client = CatalogClient::new(&mock.config).expect("client builds");

    let manager = WishlistManager::load(MemorySlot::with_raw("[\"p1\",\"p9\"]")).await;
    let mut view = WishlistView::new();
    refresh(&mut view, &manager, &client).await;

    let ViewState::Ready(products) = view.state() else {
        panic!("expected Ready");
    };
    assert_eq!(products.len(), 1);
    assert_eq!(products.first().map(|p| p.id.as_str()), Some("p1"));
}

#[tokio::test]
async fn test_mutations_survive_a_reload_through_the_slot() {
    let mock = MockCatalog::spawn(vec![
        product_doc("p1", "Tee", "₹499", "Tees", ""),
        product_doc("p2", "Hoodie", "₹999", "Hoodies", ""),
    ])
    .await;
    let client = CatalogClient::new(&mock.config).expect("client builds");

    let slot = MemorySlot::new();
    let mut manager = WishlistManager::load(slot.clone()).await;
    assert!(manager.toggle(ProductId::from("p1")).await);
    assert!(manager.toggle(ProductId::from("p2")).await);
    assert!(!manager.toggle(ProductId::from("p2")).await);

    // A fresh manager over the same slot sees the committed set.
    let reloaded = WishlistManager::load(slot).await;
    assert!(reloaded.contains(&ProductId::from("p1")));
    assert!(!reloaded.contains(&ProductId::from("p2")));

    let mut view = WishlistView::new();
    refresh(&mut view, &reloaded, &client).await;

    let ViewState::Ready(products) = view.state() else {
        panic!("expected Ready");
    };
    assert_eq!(products.len(), 1);
    assert_eq!(products.first().map(|p| p.id.as_str()), Some("p1"));
}

//! Wishlist view composition.
//!
//! Joins the identifier set with fetched catalog records into one of three
//! observable states. Each refresh carries a generation token so a response
//! arriving after the view moved on (a newer refresh started, or the view
//! was torn down) is discarded instead of applied.

use std::collections::HashSet;

use infinity_vibe_core::{Product, ProductId};
use tracing::debug;

use crate::catalog::{CatalogError, ProductSource};

use super::manager::WishlistManager;
use super::store::WishlistSlot;

/// Error text shown when the catalog fetch fails. The visitor retries by
/// reloading the page; there is no automatic retry.
const FETCH_ERROR_MESSAGE: &str = "Failed to load wishlist products.";

/// Observable state of the wishlist view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Loading,
    Error(String),
    Ready(Vec<Product>),
}

/// Identity token for one in-flight fetch, assigned at fetch start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchToken(u64);

/// State machine over [`ViewState`].
#[derive(Debug)]
pub struct WishlistView {
    state: ViewState,
    fetch_seq: u64,
}

impl Default for WishlistView {
    fn default() -> Self {
        Self::new()
    }
}

impl WishlistView {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: ViewState::Loading,
            fetch_seq: 0,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &ViewState {
        &self.state
    }

    /// Enter `Loading` and invalidate any fetch still in flight.
    pub fn begin_refresh(&mut self) -> FetchToken {
        self.fetch_seq += 1;
        self.state = ViewState::Loading;
        FetchToken(self.fetch_seq)
    }

    /// Apply a fetch outcome.
    ///
    /// A stale token (the view started a newer refresh since the fetch
    /// began) is discarded; the method returns whether the outcome was
    /// applied. Successful results are intersected with `current_ids`, the
    /// identifier set as of completion time, so a product unliked while the
    /// fetch was in flight never reappears, and identifiers deleted from
    /// the catalog are silently dropped.
    pub fn complete(
        &mut self,
        token: FetchToken,
        outcome: Result<Vec<Product>, CatalogError>,
        current_ids: &HashSet<ProductId>,
    ) -> bool {
        if token.0 != self.fetch_seq {
            debug!(token = token.0, current = self.fetch_seq, "discarding stale fetch result");
            return false;
        }

        self.state = match outcome {
            Ok(products) => ViewState::Ready(
                products
                    .into_iter()
                    .filter(|p| current_ids.contains(&p.id))
                    .collect(),
            ),
            Err(e) => {
                tracing::error!(error = %e, "wishlist fetch failed");
                ViewState::Error(FETCH_ERROR_MESSAGE.to_string())
            }
        };
        true
    }

    /// Optimistically drop a product from a `Ready` list without waiting
    /// for a re-fetch. The next full refresh reconciles (and will agree,
    /// since the id was removed from the set first).
    pub fn remove_local(&mut self, id: &ProductId) {
        if let ViewState::Ready(products) = &mut self.state {
            products.retain(|p| p.id != *id);
        }
    }
}

/// Run one full reconciliation pass: enter `Loading`, fetch the records for
/// the current identifier set (skipping the remote call entirely when the
/// set is empty), and apply the outcome against the set as of completion.
pub async fn refresh<S, C>(view: &mut WishlistView, manager: &WishlistManager<S>, source: &C)
where
    S: WishlistSlot,
    C: ProductSource,
{
    let token = view.begin_refresh();

    if manager.is_empty() {
        view.complete(token, Ok(Vec::new()), manager.ids());
        return;
    }

    let ids = manager.ids().clone();
    let outcome = source.fetch_by_ids(&ids).await;
    view.complete(token, outcome, manager.ids());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wishlist::store::MemorySlot;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn product(id: &str) -> Product {
        Product {
            id: ProductId::from(id),
            name: format!("Product {id}"),
            price: "₹499".to_string(),
            image: format!("https://cdn.example/{id}.jpg"),
            badge: None,
            category: "Tees".to_string(),
        }
    }

    fn id_set(ids: &[&str]) -> HashSet<ProductId> {
        ids.iter().map(|&id| ProductId::from(id)).collect()
    }

    /// Mock source resolving to a fixed outcome, counting calls.
    struct FixedSource {
        products: Result<Vec<Product>, ()>,
        calls: AtomicUsize,
    }

    impl FixedSource {
        fn ok(products: Vec<Product>) -> Self {
            Self {
                products: Ok(products),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                products: Err(()),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl ProductSource for FixedSource {
        async fn fetch_by_ids(
            &self,
            _ids: &HashSet<ProductId>,
        ) -> Result<Vec<Product>, CatalogError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.products {
                Ok(products) => Ok(products.clone()),
                Err(()) => Err(CatalogError::Api {
                    status: 500,
                    message: "boom".to_string(),
                }),
            }
        }
    }

    #[tokio::test]
    async fn test_empty_set_skips_fetch() {
        let manager = WishlistManager::load(MemorySlot::new()).await;
        let source = FixedSource::ok(vec![product("p1")]);
        let mut view = WishlistView::new();

        refresh(&mut view, &manager, &source).await;

        assert_eq!(view.state(), &ViewState::Ready(Vec::new()));
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn test_successful_refresh_renders_fetched_products() {
        let slot = MemorySlot::with_raw("[\"p1\"]");
        let manager = WishlistManager::load(slot).await;
        let source = FixedSource::ok(vec![product("p1")]);
        let mut view = WishlistView::new();

        refresh(&mut view, &manager, &source).await;

        let ViewState::Ready(products) = view.state() else {
            panic!("expected Ready, got {:?}", view.state());
        };
        assert_eq!(products.len(), 1);
        assert_eq!(products.first().map(|p| p.price.as_str()), Some("₹499"));
    }

    #[tokio::test]
    async fn test_fetch_failure_enters_error_state() {
        let slot = MemorySlot::with_raw("[\"p1\",\"p2\"]");
        let manager = WishlistManager::load(slot).await;
        let source = FixedSource::failing();
        let mut view = WishlistView::new();

        refresh(&mut view, &manager, &source).await;

        assert!(matches!(view.state(), ViewState::Error(_)));
    }

    #[tokio::test]
    async fn test_stale_identifier_silently_dropped() {
        // p9 is liked but no longer in the catalog: fetch omits it.
        let slot = MemorySlot::with_raw("[\"p1\",\"p9\"]");
        let manager = WishlistManager::load(slot).await;
        let source = FixedSource::ok(vec![product("p1")]);
        let mut view = WishlistView::new();

        refresh(&mut view, &manager, &source).await;

        let ViewState::Ready(products) = view.state() else {
            panic!("expected Ready");
        };
        assert_eq!(products.len(), 1);
        assert_eq!(products.first().map(|p| p.id.as_str()), Some("p1"));
    }

    #[tokio::test]
    async fn test_unlike_during_fetch_is_reconciled() {
        // Set is {A, B}; a fetch for both starts; B is removed before the
        // fetch resolves with both products. Only A may render.
        let slot = MemorySlot::with_raw("[\"A\",\"B\"]");
        let mut manager = WishlistManager::load(slot).await;
        let mut view = WishlistView::new();

        let token = view.begin_refresh();
        manager.remove(&ProductId::from("B")).await;

        let applied = view.complete(
            token,
            Ok(vec![product("A"), product("B")]),
            manager.ids(),
        );

        assert!(applied);
        let ViewState::Ready(products) = view.state() else {
            panic!("expected Ready");
        };
        assert_eq!(products.len(), 1);
        assert_eq!(products.first().map(|p| p.id.as_str()), Some("A"));
    }

    #[tokio::test]
    async fn test_stale_token_is_discarded() {
        let slot = MemorySlot::with_raw("[\"A\"]");
        let manager = WishlistManager::load(slot).await;
        let mut view = WishlistView::new();

        let stale = view.begin_refresh();
        let current = view.begin_refresh();

        assert!(!view.complete(stale, Ok(vec![product("A")]), manager.ids()));
        assert_eq!(view.state(), &ViewState::Loading);

        assert!(view.complete(current, Ok(vec![product("A")]), manager.ids()));
        assert!(matches!(view.state(), ViewState::Ready(_)));
    }

    #[tokio::test]
    async fn test_optimistic_removal() {
        let slot = MemorySlot::with_raw("[\"A\",\"B\"]");
        let manager = WishlistManager::load(slot).await;
        let source = FixedSource::ok(vec![product("A"), product("B")]);
        let mut view = WishlistView::new();

        refresh(&mut view, &manager, &source).await;
        view.remove_local(&ProductId::from("B"));

        let ViewState::Ready(products) = view.state() else {
            panic!("expected Ready");
        };
        assert_eq!(products.len(), 1);
        assert_eq!(products.first().map(|p| p.id.as_str()), Some("A"));
    }
}

//! Wishlist state manager.
//!
//! The single source of truth for "is this product liked" during a request,
//! plus the bridge to durable storage. One manager is constructed per
//! visitor session and passed by reference to every consumer; there is no
//! ambient global instance.

use std::collections::HashSet;

use infinity_vibe_core::ProductId;
use tokio::sync::watch;
use tracing::warn;

use super::store::WishlistSlot;

/// Owns the in-memory set of liked identifiers.
///
/// Every mutation commits synchronously: the full resulting set (not a
/// delta) is re-serialized through the slot, then subscribers are notified
/// through a watch channel. A failed slot write is logged and recovered
/// implicitly, since the next mutation rewrites the full state anyway.
pub struct WishlistManager<S: WishlistSlot> {
    ids: HashSet<ProductId>,
    slot: S,
    committed: watch::Sender<HashSet<ProductId>>,
}

impl<S: WishlistSlot> WishlistManager<S> {
    /// Construct the manager by adopting the slot's current contents.
    ///
    /// A missing or malformed slot yields the empty set (the slot reports
    /// that to the observability sink itself, never to the user).
    pub async fn load(slot: S) -> Self {
        let ids = slot.load().await;
        let (committed, _) = watch::channel(ids.clone());
        Self {
            ids,
            slot,
            committed,
        }
    }

    /// Insert `id`. Idempotent: a no-op (without a slot write) if already
    /// present.
    pub async fn add(&mut self, id: ProductId) {
        if self.ids.insert(id) {
            self.commit().await;
        }
    }

    /// Remove `id`. Idempotent: a no-op if absent.
    pub async fn remove(&mut self, id: &ProductId) {
        if self.ids.remove(id) {
            self.commit().await;
        }
    }

    /// Remove `id` if present, insert it otherwise. Computed from the
    /// current committed state, never a stale snapshot. Returns whether the
    /// id is liked afterwards.
    pub async fn toggle(&mut self, id: ProductId) -> bool {
        if self.ids.contains(&id) {
            self.remove(&id).await;
            false
        } else {
            self.add(id).await;
            true
        }
    }

    /// Empty the set.
    pub async fn clear(&mut self) {
        if !self.ids.is_empty() {
            self.ids.clear();
            self.commit().await;
        }
    }

    /// Membership test. Pure query, no side effect.
    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.ids.contains(id)
    }

    /// The current committed identifier set.
    #[must_use]
    pub const fn ids(&self) -> &HashSet<ProductId> {
        &self.ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Subscribe to committed-state notifications. The channel publishes
    /// the full set synchronously after each mutation.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<HashSet<ProductId>> {
        self.committed.subscribe()
    }

    async fn commit(&self) {
        if let Err(e) = self.slot.save(&self.ids).await {
            // Not surfaced to the user: the next mutation re-serializes the
            // full state, which doubles as the retry.
            warn!(error = %e, "failed to persist wishlist");
        }
        self.committed.send_replace(self.ids.clone());
    }
}

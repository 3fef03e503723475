//! Persistent set store for wishlist identifiers.
//!
//! One string-keyed slot holds the liked ids as a flat JSON array under a
//! fixed, versionless key. A missing or malformed slot is never an error:
//! it is logged and treated as the empty set.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use infinity_vibe_core::ProductId;
use thiserror::Error;
use tower_sessions::Session;
use tracing::warn;

/// Fixed session key for the wishlist slot. No versioning, no migration
/// path: the format is a flat array of identifier strings.
pub const WISHLIST_KEY: &str = "wishlist";

/// Errors writing the slot. Reads never fail; malformed data degrades to
/// the empty set.
#[derive(Debug, Error)]
pub enum SlotError {
    #[error("session store error: {0}")]
    Session(#[from] tower_sessions::session::Error),
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Durable storage for the wishlist identifier set.
pub trait WishlistSlot {
    /// Read the slot. Absent or malformed data yields the empty set.
    fn load(&self) -> impl Future<Output = HashSet<ProductId>> + Send;

    /// Overwrite the slot with the full set, serialized as an ordered list
    /// (sorted, so the stored form is stable across writes).
    fn save(&self, ids: &HashSet<ProductId>) -> impl Future<Output = Result<(), SlotError>> + Send;
}

/// Serialize the set in its stored list form.
fn to_sorted_list(ids: &HashSet<ProductId>) -> Vec<&ProductId> {
    let mut list: Vec<&ProductId> = ids.iter().collect();
    list.sort();
    list
}

// =============================================================================
// SessionSlot
// =============================================================================

/// Production slot backed by the visitor's session.
#[derive(Clone)]
pub struct SessionSlot {
    session: Session,
}

impl SessionSlot {
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }
}

impl WishlistSlot for SessionSlot {
    async fn load(&self) -> HashSet<ProductId> {
        match self.session.get::<Vec<ProductId>>(WISHLIST_KEY).await {
            Ok(Some(ids)) => ids.into_iter().collect(),
            Ok(None) => HashSet::new(),
            Err(e) => {
                // Malformed slot data: recover to empty, never surface.
                warn!(error = %e, "failed to read wishlist slot, treating as empty");
                HashSet::new()
            }
        }
    }

    async fn save(&self, ids: &HashSet<ProductId>) -> Result<(), SlotError> {
        self.session.insert(WISHLIST_KEY, to_sorted_list(ids)).await?;
        Ok(())
    }
}

// =============================================================================
// MemorySlot
// =============================================================================

/// In-process slot holding the raw serialized value.
///
/// Used by tests (the raw form makes malformed-data behavior observable)
/// and by local tooling that runs without a session layer. Clones share the
/// stored value, mirroring how two requests share one session.
#[derive(Debug, Default, Clone)]
pub struct MemorySlot {
    raw: Arc<Mutex<Option<String>>>,
}

impl MemorySlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a slot pre-populated with a raw serialized value.
    #[must_use]
    pub fn with_raw(raw: &str) -> Self {
        Self {
            raw: Arc::new(Mutex::new(Some(raw.to_owned()))),
        }
    }

    /// The raw stored value, if any.
    #[must_use]
    pub fn raw(&self) -> Option<String> {
        self.raw
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl WishlistSlot for MemorySlot {
    async fn load(&self) -> HashSet<ProductId> {
        let raw = self.raw();
        match raw {
            None => HashSet::new(),
            Some(raw) => match serde_json::from_str::<Vec<ProductId>>(&raw) {
                Ok(ids) => ids.into_iter().collect(),
                Err(e) => {
                    warn!(error = %e, "failed to parse wishlist slot, treating as empty");
                    HashSet::new()
                }
            },
        }
    }

    async fn save(&self, ids: &HashSet<ProductId>) -> Result<(), SlotError> {
        let serialized = serde_json::to_string(&to_sorted_list(ids))?;
        *self
            .raw
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(serialized);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id_set(ids: &[&str]) -> HashSet<ProductId> {
        ids.iter().map(|&id| ProductId::from(id)).collect()
    }

    #[tokio::test]
    async fn test_round_trip() {
        let slot = MemorySlot::new();
        let ids = id_set(&["p1", "p2", "p3"]);

        slot.save(&ids).await.expect("save succeeds");
        assert_eq!(slot.load().await, ids);
    }

    #[tokio::test]
    async fn test_round_trip_empty_set() {
        let slot = MemorySlot::new();
        slot.save(&HashSet::new()).await.expect("save succeeds");
        assert_eq!(slot.load().await, HashSet::new());
        assert_eq!(slot.raw().as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn test_absent_slot_loads_empty() {
        let slot = MemorySlot::new();
        assert!(slot.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_slot_loads_empty() {
        for raw in ["not json", "{\"a\":1}", "[1,2,3]", "\"p1\""] {
            let slot = MemorySlot::with_raw(raw);
            assert!(slot.load().await.is_empty(), "raw {raw:?} should load empty");
        }
    }

    #[tokio::test]
    async fn test_stored_form_is_sorted_array() {
        let slot = MemorySlot::new();
        slot.save(&id_set(&["b", "a", "c"])).await.expect("save");
        assert_eq!(slot.raw().as_deref(), Some("[\"a\",\"b\",\"c\"]"));
    }

    #[tokio::test]
    async fn test_save_overwrites_unconditionally() {
        let slot = MemorySlot::with_raw("garbage");
        slot.save(&id_set(&["p1"])).await.expect("save");
        assert_eq!(slot.load().await, id_set(&["p1"]));
    }
}

//! Wishlist subsystem.
//!
//! A visitor's liked products are a set of catalog identifiers kept in
//! durable per-session storage and reconciled against the remote catalog on
//! every render:
//!
//! - [`store`] - the persistent set slot (load/save of the id array)
//! - [`manager`] - the in-memory set of liked ids, the single source of
//!   truth during a request, persisting the whole set on every mutation
//! - [`view`] - the Loading/Error/Ready state machine that joins the id set
//!   with fetched records, guarding against stale in-flight fetches
//!
//! Mutation flow: UI action -> manager updates the set -> slot write ->
//! next render fetches records restricted to the current set.

pub mod manager;
pub mod store;
pub mod view;

pub use manager::WishlistManager;
pub use store::{MemorySlot, SessionSlot, SlotError, WishlistSlot};
pub use view::{ViewState, WishlistView, refresh};

//! Remote catalog client.
//!
//! # Architecture
//!
//! - The document store is the source of truth - NO local sync, direct
//!   REST calls per render
//! - Plain JSON over `reqwest`; documents are validated into typed
//!   [`Product`] records at this boundary
//! - No response caching: every view mount re-fetches (catalog records are
//!   transient, read-only copies)
//!
//! # Operations
//!
//! - `fetch_all` - full product listing for catalog browsing
//! - `fetch_by_ids` - batched membership query used by the wishlist

mod client;

pub use client::CatalogClient;

use std::collections::HashSet;

use infinity_vibe_core::{Product, ProductId};
use thiserror::Error;

/// Errors that can occur when querying the remote catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed (network, TLS, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store answered with a non-success status.
    #[error("Catalog API returned {status}: {message}")]
    Api { status: u16, message: String },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Rate limited by the store.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),
}

/// Read access to catalog records restricted to an identifier set.
///
/// This is the seam between the wishlist view composition and the remote
/// store: production code uses [`CatalogClient`], tests substitute mocks.
pub trait ProductSource {
    /// Fetch the records whose identifier is in `ids`.
    ///
    /// An empty `ids` set must resolve to an empty list without issuing any
    /// remote call. Result order is unspecified, and identifiers with no
    /// matching record are silently omitted.
    fn fetch_by_ids(
        &self,
        ids: &HashSet<ProductId>,
    ) -> impl Future<Output = Result<Vec<Product>, CatalogError>> + Send;
}

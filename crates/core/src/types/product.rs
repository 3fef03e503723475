//! Catalog product record.

use serde::{Deserialize, Serialize};

use super::ProductId;

/// A catalog entry, owned by the remote document store.
///
/// Instances on this side are transient read-only copies fetched per render.
/// The price is a pre-formatted display string with currency symbol
/// (e.g. `"₹499"`), never a numeric type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Remote-assigned document id.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Pre-formatted price string, currency symbol included.
    pub price: String,
    /// Image URL.
    pub image: String,
    /// Optional badge label ("NEW DROP", "BESTSELLER", ...).
    /// Absent is the canonical empty representation; an empty string coming
    /// off the wire is normalized to `None` at the document boundary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    /// Category name used for catalog filtering.
    pub category: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_omitted_when_absent() {
        let product = Product {
            id: ProductId::from("p1"),
            name: "Oversized Tee".to_string(),
            price: "₹499".to_string(),
            image: "https://cdn.example/p1.jpg".to_string(),
            badge: None,
            category: "Tees".to_string(),
        };

        let json = serde_json::to_value(&product).expect("serialize");
        assert!(json.get("badge").is_none());
    }
}

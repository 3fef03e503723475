//! Wire representation of remote catalog documents.
//!
//! The document store returns records as named documents whose fields are
//! wrapped in typed value envelopes (`{"stringValue": "..."}`). This module
//! models that shape and performs the validated conversion into [`Product`]
//! at the boundary, so untyped wire data never reaches the view layer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Product, ProductId};

/// A document as returned by the remote store.
///
/// The `name` is a full resource path
/// (`projects/{p}/databases/(default)/documents/products/{id}`); the product
/// identifier is its last path segment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub fields: BTreeMap<String, Value>,
}

/// A typed field value envelope.
///
/// Only the value kinds the catalog schema uses are modelled; a document
/// carrying any other kind fails deserialization and is rejected by the
/// adapter as malformed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Value {
    StringValue(String),
    IntegerValue(String),
    DoubleValue(f64),
    BooleanValue(bool),
}

impl Value {
    /// The string content, if this is a string value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::StringValue(s) => Some(s),
            _ => None,
        }
    }
}

/// Errors converting a wire document into a typed record.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("document has no name")]
    MissingName,
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    #[error("field `{0}` is not a string")]
    FieldType(&'static str),
}

impl Document {
    /// The product id encoded in the document's resource path.
    #[must_use]
    pub fn id(&self) -> Option<ProductId> {
        let segment = self.name.rsplit('/').next()?;
        if segment.is_empty() {
            None
        } else {
            Some(ProductId::from(segment))
        }
    }

    fn required_string(&self, field: &'static str) -> Result<String, DocumentError> {
        let value = self
            .fields
            .get(field)
            .ok_or(DocumentError::MissingField(field))?;
        value
            .as_str()
            .map(str::to_owned)
            .ok_or(DocumentError::FieldType(field))
    }

    fn optional_string(&self, field: &'static str) -> Result<Option<String>, DocumentError> {
        match self.fields.get(field) {
            None => Ok(None),
            Some(value) => value
                .as_str()
                .map(str::to_owned)
                .map(Some)
                .ok_or(DocumentError::FieldType(field)),
        }
    }
}

impl TryFrom<Document> for Product {
    type Error = DocumentError;

    fn try_from(doc: Document) -> Result<Self, Self::Error> {
        let id = doc.id().ok_or(DocumentError::MissingName)?;

        // Empty badge strings are canonicalized to absent.
        let badge = doc.optional_string("badge")?.filter(|b| !b.is_empty());

        Ok(Self {
            name: doc.required_string("name")?,
            price: doc.required_string("price")?,
            image: doc.required_string("image")?,
            category: doc.required_string("category")?,
            badge,
            id,
        })
    }
}

/// Build the field map for a new product document.
///
/// An empty badge is omitted entirely, keeping "badge absent" the canonical
/// representation on the remote side as well.
#[must_use]
pub fn product_fields(
    name: &str,
    price: &str,
    image: &str,
    badge: Option<&str>,
    category: &str,
) -> BTreeMap<String, Value> {
    let mut fields = BTreeMap::new();
    fields.insert("name".to_owned(), Value::StringValue(name.to_owned()));
    fields.insert("price".to_owned(), Value::StringValue(price.to_owned()));
    fields.insert("image".to_owned(), Value::StringValue(image.to_owned()));
    fields.insert(
        "category".to_owned(),
        Value::StringValue(category.to_owned()),
    );
    if let Some(badge) = badge.filter(|b| !b.is_empty()) {
        fields.insert("badge".to_owned(), Value::StringValue(badge.to_owned()));
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(json: serde_json::Value) -> Document {
        serde_json::from_value(json).expect("valid document json")
    }

    #[test]
    fn test_value_envelope_roundtrip() {
        let value = Value::StringValue("₹499".to_string());
        let json = serde_json::to_value(&value).expect("serialize");
        assert_eq!(json, json!({"stringValue": "₹499"}));
    }

    #[test]
    fn test_document_id_is_last_path_segment() {
        let doc = doc(json!({
            "name": "projects/infinity-vibe/databases/(default)/documents/products/p1",
            "fields": {}
        }));
        assert_eq!(doc.id(), Some(ProductId::from("p1")));
    }

    #[test]
    fn test_convert_full_document() {
        let doc = doc(json!({
            "name": "projects/x/databases/(default)/documents/products/p1",
            "fields": {
                "name": {"stringValue": "Oversized Tee"},
                "price": {"stringValue": "₹499"},
                "image": {"stringValue": "https://cdn.example/p1.jpg"},
                "badge": {"stringValue": "NEW DROP"},
                "category": {"stringValue": "Tees"}
            }
        }));

        let product = Product::try_from(doc).expect("converts");
        assert_eq!(product.id, ProductId::from("p1"));
        assert_eq!(product.name, "Oversized Tee");
        assert_eq!(product.price, "₹499");
        assert_eq!(product.badge.as_deref(), Some("NEW DROP"));
    }

    #[test]
    fn test_empty_badge_is_absent() {
        let doc = doc(json!({
            "name": "projects/x/databases/(default)/documents/products/p2",
            "fields": {
                "name": {"stringValue": "Cargo Pants"},
                "price": {"stringValue": "₹1299"},
                "image": {"stringValue": "https://cdn.example/p2.jpg"},
                "badge": {"stringValue": ""},
                "category": {"stringValue": "Bottoms"}
            }
        }));

        let product = Product::try_from(doc).expect("converts");
        assert_eq!(product.badge, None);
    }

    #[test]
    fn test_missing_required_field_rejected() {
        let doc = doc(json!({
            "name": "projects/x/databases/(default)/documents/products/p3",
            "fields": {
                "name": {"stringValue": "Hoodie"},
                "image": {"stringValue": "https://cdn.example/p3.jpg"},
                "category": {"stringValue": "Hoodies"}
            }
        }));

        let err = Product::try_from(doc).expect_err("price missing");
        assert!(matches!(err, DocumentError::MissingField("price")));
    }

    #[test]
    fn test_non_string_field_rejected() {
        let doc = doc(json!({
            "name": "projects/x/databases/(default)/documents/products/p4",
            "fields": {
                "name": {"stringValue": "Cap"},
                "price": {"doubleValue": 499.0},
                "image": {"stringValue": "https://cdn.example/p4.jpg"},
                "category": {"stringValue": "Accessories"}
            }
        }));

        let err = Product::try_from(doc).expect_err("price not a string");
        assert!(matches!(err, DocumentError::FieldType("price")));
    }

    #[test]
    fn test_product_fields_omits_empty_badge() {
        let fields = product_fields("Tee", "₹499", "https://cdn.example/t.jpg", Some(""), "Tees");
        assert!(!fields.contains_key("badge"));

        let fields = product_fields(
            "Tee",
            "₹499",
            "https://cdn.example/t.jpg",
            Some("LIMITED"),
            "Tees",
        );
        assert!(fields.contains_key("badge"));
    }
}

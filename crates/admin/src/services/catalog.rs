//! Document store client with write access for product management.
//!
//! The storefront only reads the catalog; this client also creates and
//! deletes product documents. Documents use the store's typed value
//! envelopes, built and validated through the shared core types.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::instrument;

use infinity_vibe_core::{Document, Product, ProductId, product_fields};

use crate::config::CatalogConfig;

/// Collection holding product documents.
const PRODUCTS_COLLECTION: &str = "products";

/// Request timeout for document store calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors from the document store.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store returned an error response.
    #[error("document store error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Failed to parse the store response.
    #[error("response parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Deserialize)]
struct ListDocumentsResponse {
    #[serde(default)]
    documents: Vec<Document>,
}

#[derive(serde::Serialize)]
struct CreateDocumentRequest {
    fields: std::collections::BTreeMap<String, infinity_vibe_core::Value>,
}

/// Document store client with write access.
#[derive(Debug, Clone)]
pub struct CatalogWriter {
    client: reqwest::Client,
    documents_url: String,
    api_key: String,
}

impl CatalogWriter {
    /// Create a new writer for the configured project.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        let documents_url = format!(
            "{}/v1/projects/{}/databases/(default)/documents",
            config.api_base.trim_end_matches('/'),
            config.project_id
        );

        Ok(Self {
            client,
            documents_url,
            api_key: config.api_key.clone(),
        })
    }

    /// List every product in the catalog.
    ///
    /// Unlike the storefront read path, malformed documents are surfaced in
    /// the log at warn level and skipped, so a bad record never hides the
    /// rest of the list from the admin.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
        let url = format!("{}/{PRODUCTS_COLLECTION}", self.documents_url);
        let response = self
            .client
            .get(&url)
            .query(&[("key", self.api_key.as_str()), ("pageSize", "300")])
            .send()
            .await?;

        let response = check_response(response).await?;
        let body = response.json::<ListDocumentsResponse>().await?;

        let mut products = Vec::with_capacity(body.documents.len());
        for document in body.documents {
            match Product::try_from(document) {
                Ok(product) => products.push(product),
                Err(e) => tracing::warn!(error = %e, "skipping malformed product document"),
            }
        }

        Ok(products)
    }

    /// Create a product document. The store assigns the document id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the store rejects it.
    #[instrument(skip(self), fields(name = %name))]
    pub async fn create_product(
        &self,
        name: &str,
        price: &str,
        image: &str,
        badge: Option<&str>,
        category: &str,
    ) -> Result<ProductId, CatalogError> {
        let url = format!("{}/{PRODUCTS_COLLECTION}", self.documents_url);
        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&CreateDocumentRequest {
                fields: product_fields(name, price, image, badge, category),
            })
            .send()
            .await?;

        let response = check_response(response).await?;
        let document = response.json::<Document>().await?;
        let id = document.id().map_or_else(
            || {
                tracing::warn!("created document has no resource name");
                ProductId::from("")
            },
            ProductId::from,
        );

        tracing::info!(product_id = %id, "product created");
        Ok(id)
    }

    /// Delete a product document by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the store rejects it.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete_product(&self, id: &ProductId) -> Result<(), CatalogError> {
        let url = format!("{}/{PRODUCTS_COLLECTION}/{id}", self.documents_url);
        let response = self
            .client
            .delete(&url)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        check_response(response).await?;
        tracing::info!(product_id = %id, "product deleted");
        Ok(())
    }
}

/// Map non-success responses to `CatalogError::Api`.
async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, CatalogError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::error!(
        status = status.as_u16(),
        body = %body.chars().take(500).collect::<String>(),
        "document store request failed"
    );

    Err(CatalogError::Api {
        status: status.as_u16(),
        message: body.chars().take(200).collect(),
    })
}

//! REST client for the remote document store.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use infinity_vibe_core::{Document, Product, ProductId};
use serde::Deserialize;
use serde_json::json;
use tracing::{instrument, warn};

use crate::config::CatalogConfig;

use super::{CatalogError, ProductSource};

/// Collection holding the product documents.
const PRODUCTS_COLLECTION: &str = "products";

/// Defensive request timeout; the store's own timeout behavior is outside
/// this subsystem's control.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Upper bound the store places on IN-filter disjunctions. Larger identifier
/// sets would need batching, which this client does not implement; realistic
/// wishlist sizes stay far below the cap.
const MAX_MEMBERSHIP_IDS: usize = 30;

/// Client for the remote catalog's document API.
///
/// Cheaply cloneable; all requests share one connection pool.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    /// `{api_base}/v1/{database_path}` - documents root URL.
    documents_url: String,
    /// `projects/{p}/databases/(default)/documents` - resource path prefix.
    database_path: String,
    api_key: String,
}

/// Response shape of a document list request.
#[derive(Debug, Deserialize)]
struct ListDocumentsResponse {
    #[serde(default)]
    documents: Vec<Document>,
}

/// One row of a structured query response. Rows that carry only a read
/// timestamp (no matching document) have no `document` key.
#[derive(Debug, Deserialize)]
struct QueryRow {
    #[serde(default)]
    document: Option<Document>,
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        let database_path = format!(
            "projects/{}/databases/(default)/documents",
            config.project_id
        );
        let documents_url = format!("{}/v1/{database_path}", config.api_base);

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                documents_url,
                database_path,
                api_key: config.api_key.clone(),
            }),
        })
    }

    /// Fetch every product record in the catalog.
    ///
    /// Malformed documents are logged and skipped; they never surface as an
    /// error or reach the view layer untyped.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn fetch_all(&self) -> Result<Vec<Product>, CatalogError> {
        let url = format!(
            "{}/{PRODUCTS_COLLECTION}?key={}&pageSize=300",
            self.inner.documents_url, self.inner.api_key
        );

        let body = self.get(&url).await?;
        let response: ListDocumentsResponse = serde_json::from_str(&body)?;

        Ok(convert_documents(response.documents))
    }

    /// Fetch the records whose identifier is in `ids` with one membership
    /// query against the document name.
    ///
    /// See [`ProductSource::fetch_by_ids`] for the contract. Sets larger
    /// than the store's IN-filter cap ([`MAX_MEMBERSHIP_IDS`]) are sent
    /// as-is and rejected remotely; batching is deliberately not implemented.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, ids), fields(count = ids.len()))]
    pub async fn fetch_by_ids(
        &self,
        ids: &HashSet<ProductId>,
    ) -> Result<Vec<Product>, CatalogError> {
        // Short-circuit: an empty membership query is invalid remotely.
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        if ids.len() > MAX_MEMBERSHIP_IDS {
            warn!(
                count = ids.len(),
                cap = MAX_MEMBERSHIP_IDS,
                "membership query exceeds the store's IN-filter cap"
            );
        }

        let references: Vec<serde_json::Value> = ids
            .iter()
            .map(|id| {
                json!({
                    "referenceValue": format!(
                        "{}/{PRODUCTS_COLLECTION}/{id}",
                        self.inner.database_path
                    )
                })
            })
            .collect();

        let query = json!({
            "structuredQuery": {
                "from": [{"collectionId": PRODUCTS_COLLECTION}],
                "where": {
                    "fieldFilter": {
                        "field": {"fieldPath": "__name__"},
                        "op": "IN",
                        "value": {"arrayValue": {"values": references}}
                    }
                }
            }
        });

        let url = format!(
            "{}:runQuery?key={}",
            self.inner.documents_url, self.inner.api_key
        );

        let response = self
            .inner
            .client
            .post(&url)
            .json(&query)
            .send()
            .await?;
        let body = check_response(response).await?;

        let rows: Vec<QueryRow> = serde_json::from_str(&body)?;
        let documents = rows.into_iter().filter_map(|row| row.document).collect();

        Ok(convert_documents(documents))
    }

    async fn get(&self, url: &str) -> Result<String, CatalogError> {
        let response = self.inner.client.get(url).send().await?;
        check_response(response).await
    }
}

impl ProductSource for CatalogClient {
    async fn fetch_by_ids(&self, ids: &HashSet<ProductId>) -> Result<Vec<Product>, CatalogError> {
        Self::fetch_by_ids(self, ids).await
    }
}

/// Map a response to its body text, converting non-success statuses into
/// catalog errors.
async fn check_response(response: reqwest::Response) -> Result<String, CatalogError> {
    let status = response.status();

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get("Retry-After")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(1);
        return Err(CatalogError::RateLimited(retry_after));
    }

    let body = response.text().await?;

    if !status.is_success() {
        tracing::error!(
            status = %status,
            body = %body.chars().take(500).collect::<String>(),
            "Catalog API returned non-success status"
        );
        return Err(CatalogError::Api {
            status: status.as_u16(),
            message: body.chars().take(200).collect(),
        });
    }

    Ok(body)
}

/// Convert wire documents into typed records, dropping malformed ones.
fn convert_documents(documents: Vec<Document>) -> Vec<Product> {
    documents
        .into_iter()
        .filter_map(|doc| {
            let name = doc.name.clone();
            match Product::try_from(doc) {
                Ok(product) => Some(product),
                Err(e) => {
                    warn!(document = %name, error = %e, "skipping malformed catalog document");
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_client() -> CatalogClient {
        CatalogClient::new(&CatalogConfig {
            api_base: "https://firestore.googleapis.com".to_string(),
            project_id: "infinity-vibe".to_string(),
            api_key: "key".to_string(),
        })
        .expect("client builds")
    }

    #[tokio::test]
    async fn test_fetch_by_ids_empty_set_short_circuits() {
        // No server exists behind this client; an issued request would fail,
        // so an Ok(empty) result proves no call was made.
        let client = CatalogClient::new(&CatalogConfig {
            api_base: "http://127.0.0.1:9".to_string(),
            project_id: "infinity-vibe".to_string(),
            api_key: "key".to_string(),
        })
        .expect("client builds");

        let products = client
            .fetch_by_ids(&HashSet::new())
            .await
            .expect("short-circuits");
        assert!(products.is_empty());
    }

    #[test]
    fn test_convert_documents_skips_malformed() {
        let good: Document = serde_json::from_value(json!({
            "name": "projects/x/databases/(default)/documents/products/p1",
            "fields": {
                "name": {"stringValue": "Tee"},
                "price": {"stringValue": "₹499"},
                "image": {"stringValue": "https://cdn.example/p1.jpg"},
                "category": {"stringValue": "Tees"}
            }
        }))
        .expect("valid document");

        let bad: Document = serde_json::from_value(json!({
            "name": "projects/x/databases/(default)/documents/products/p2",
            "fields": {
                "name": {"stringValue": "Hoodie"}
            }
        }))
        .expect("valid document");

        let products = convert_documents(vec![good, bad]);
        assert_eq!(products.len(), 1);
        assert_eq!(products.first().map(|p| p.id.as_str()), Some("p1"));
    }

    #[test]
    fn test_query_row_without_document_deserializes() {
        let row: QueryRow =
            serde_json::from_value(json!({"readTime": "2026-01-01T00:00:00Z"})).expect("row");
        assert!(row.document.is_none());
    }

    #[test]
    fn test_documents_url_shape() {
        let client = test_client();
        assert_eq!(
            client.inner.documents_url,
            "https://firestore.googleapis.com/v1/projects/infinity-vibe/databases/(default)/documents"
        );
    }
}

//! Integration test support for Infinity Vibe.
//!
//! Provides an in-process mock of the remote document store so the wishlist
//! subsystem and the catalog adapter can be exercised over real HTTP without
//! network access or credentials.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p infinity-vibe-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::{Value, json};

use infinity_vibe_storefront::config::CatalogConfig;

/// Project id the mock store serves.
pub const TEST_PROJECT: &str = "test-project";

/// Resource path prefix for documents in the mock store.
#[must_use]
pub fn database_path() -> String {
    format!("projects/{TEST_PROJECT}/databases/(default)/documents")
}

/// Build a well-formed product document for the mock store.
#[must_use]
pub fn product_doc(id: &str, name: &str, price: &str, category: &str, badge: &str) -> Value {
    let mut fields = json!({
        "name": {"stringValue": name},
        "price": {"stringValue": price},
        "image": {"stringValue": format!("https://cdn.test/{id}.jpg")},
        "category": {"stringValue": category},
    });
    if let Some(map) = fields.as_object_mut() {
        map.insert("badge".to_string(), json!({"stringValue": badge}));
    }

    json!({
        "name": format!("{}/products/{id}", database_path()),
        "fields": fields,
    })
}

struct MockState {
    documents: Vec<Value>,
    hits: AtomicUsize,
    fail_status: Option<u16>,
}

/// An in-process document store listening on an ephemeral port.
pub struct MockCatalog {
    state: Arc<MockState>,
    /// Catalog configuration pointing at the mock listener.
    pub config: CatalogConfig,
}

impl MockCatalog {
    /// Spawn a mock store serving the given documents.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound (test environment failure).
    pub async fn spawn(documents: Vec<Value>) -> Self {
        Self::spawn_inner(documents, None).await
    }

    /// Spawn a mock store that answers every request with `status`.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound (test environment failure).
    pub async fn spawn_failing(status: u16) -> Self {
        Self::spawn_inner(Vec::new(), Some(status)).await
    }

    async fn spawn_inner(documents: Vec<Value>, fail_status: Option<u16>) -> Self {
        let state = Arc::new(MockState {
            documents,
            hits: AtomicUsize::new(0),
            fail_status,
        });

        let documents_route = format!("/v1/{}/products", database_path());
        let query_route = format!("/v1/{}:runQuery", database_path());

        let app = Router::new()
            .route(&documents_route, get(list_documents))
            .route(&query_route, post(run_query))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock listener");
        let addr = listener.local_addr().expect("local addr");

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            state,
            config: CatalogConfig {
                api_base: format!("http://{addr}"),
                project_id: TEST_PROJECT.to_string(),
                api_key: "test-key".to_string(),
            },
        }
    }

    /// Number of requests the mock has served.
    #[must_use]
    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }
}

async fn list_documents(State(state): State<Arc<MockState>>) -> axum::response::Response {
    state.hits.fetch_add(1, Ordering::SeqCst);

    if let Some(status) = state.fail_status {
        return error_response(status);
    }

    Json(json!({"documents": state.documents})).into_response()
}

async fn run_query(
    State(state): State<Arc<MockState>>,
    Json(body): Json<Value>,
) -> axum::response::Response {
    state.hits.fetch_add(1, Ordering::SeqCst);

    if let Some(status) = state.fail_status {
        return error_response(status);
    }

    // Pull the document references out of the IN filter.
    let references: Vec<&str> = body
        .pointer("/structuredQuery/where/fieldFilter/value/arrayValue/values")
        .and_then(Value::as_array)
        .map(|values| {
            values
                .iter()
                .filter_map(|v| v.pointer("/referenceValue").and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default();

    let rows: Vec<Value> = state
        .documents
        .iter()
        .filter(|doc| {
            doc.pointer("/name")
                .and_then(Value::as_str)
                .is_some_and(|name| references.contains(&name))
        })
        .map(|doc| json!({"document": doc, "readTime": "2026-01-01T00:00:00Z"}))
        .collect();

    if rows.is_empty() {
        // The store answers a no-match query with a read-time-only row.
        return Json(json!([{"readTime": "2026-01-01T00:00:00Z"}])).into_response();
    }

    Json(Value::Array(rows)).into_response()
}

fn error_response(status: u16) -> axum::response::Response {
    let code = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (code, Json(json!({"error": {"message": "mock failure"}}))).into_response()
}

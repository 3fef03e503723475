//! Application state shared across admin handlers.

use std::sync::Arc;

use crate::config::AdminConfig;
use crate::error::AppError;
use crate::services::{AuthClient, CatalogWriter, StorageClient};

/// Shared application state. Cheap to clone (Arc inner).
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    auth: AuthClient,
    catalog: CatalogWriter,
    storage: StorageClient,
}

impl AppState {
    /// Build the state and its service clients from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any HTTP client cannot be built.
    pub fn new(config: AdminConfig) -> Result<Self, AppError> {
        let auth = AuthClient::new(&config.auth)?;
        let catalog = CatalogWriter::new(&config.catalog)?;
        let storage = StorageClient::new(&config.storage)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                auth,
                catalog,
                storage,
            }),
        })
    }

    /// Application configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Identity provider client.
    #[must_use]
    pub fn auth(&self) -> &AuthClient {
        &self.inner.auth
    }

    /// Document store writer.
    #[must_use]
    pub fn catalog(&self) -> &CatalogWriter {
        &self.inner.catalog
    }

    /// Object storage client.
    #[must_use]
    pub fn storage(&self) -> &StorageClient {
        &self.inner.storage
    }
}

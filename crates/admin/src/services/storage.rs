//! Object storage client for product image uploads.
//!
//! Uploads raw image bytes to the hosted object storage bucket and returns
//! the public URL the storefront will serve from.

use std::time::Duration;

use rand::Rng;
use secrecy::ExposeSecret;
use thiserror::Error;
use tracing::instrument;

use crate::config::StorageConfig;

/// Request timeout for storage calls. Uploads carry image payloads, so this
/// is longer than the catalog timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors from the object storage service.
#[derive(Debug, Error)]
pub enum StorageError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The storage service returned an error response.
    #[error("storage error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// Client for the hosted object storage.
#[derive(Debug, Clone)]
pub struct StorageClient {
    client: reqwest::Client,
    api_base: String,
    bucket: String,
    service_key: String,
}

impl StorageClient {
    /// Create a new object storage client.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &StorageConfig) -> Result<Self, StorageError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            bucket: config.bucket.clone(),
            service_key: config.service_key.expose_secret().to_string(),
        })
    }

    /// Upload image bytes under a fresh collision-resistant path and return
    /// the public URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the upload request fails or the service rejects it.
    #[instrument(skip(self, bytes), fields(file_name = %file_name, size = bytes.len()))]
    pub async fn upload_image(
        &self,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, StorageError> {
        let path = object_path(file_name);
        let upload_url = format!("{}/object/{}/{}", self.api_base, self.bucket, path);

        let response = self
            .client
            .post(&upload_url)
            .bearer_auth(&self.service_key)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::Api {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        let public_url = format!("{}/object/public/{}/{}", self.api_base, self.bucket, path);
        tracing::info!(url = %public_url, "image uploaded");
        Ok(public_url)
    }
}

/// Build a collision-resistant object path from the original file name:
/// millisecond timestamp plus a random suffix, keeping the extension.
fn object_path(file_name: &str) -> String {
    let timestamp = chrono::Utc::now().timestamp_millis();
    let suffix: u32 = rand::rng().random_range(0..1_000_000);

    let extension = std::path::Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("bin");

    format!("{timestamp}-{suffix:06}.{extension}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_path_keeps_extension() {
        let path = object_path("tee-front.jpg");
        assert!(path.ends_with(".jpg"));
    }

    #[test]
    fn test_object_path_defaults_extension() {
        let path = object_path("no-extension");
        assert!(path.ends_with(".bin"));
    }

    #[test]
    fn test_object_path_unique() {
        // Random suffix makes collisions within a millisecond unlikely
        let a = object_path("a.png");
        let b = object_path("a.png");
        assert_ne!(a, b);
    }
}

//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `ADMIN_BASE_URL` - Public URL for the admin site
//! - `ADMIN_SESSION_SECRET` - Session signing secret (min 32 chars, high entropy)
//! - `CATALOG_PROJECT_ID` - Remote document store project id
//! - `CATALOG_API_KEY` - Document store web API key
//! - `AUTH_API_KEY` - Identity provider web API key
//! - `STORAGE_API_BASE` - Object storage endpoint
//! - `STORAGE_SERVICE_KEY` - Object storage service key (secret, write access)
//!
//! ## Optional
//! - `ADMIN_HOST` - Bind address (default: 127.0.0.1)
//! - `ADMIN_PORT` - Listen port (default: 3001)
//! - `CATALOG_API_BASE` - Document store endpoint (default: https://firestore.googleapis.com)
//! - `AUTH_API_BASE` - Identity provider endpoint (default: https://identitytoolkit.googleapis.com)
//! - `STORAGE_BUCKET` - Image bucket name (default: product-images)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

const MIN_SESSION_SECRET_LENGTH: usize = 32;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive).
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Admin application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the admin site
    pub base_url: String,
    /// Session signing secret
    pub session_secret: SecretString,
    /// Remote catalog (document store) configuration
    pub catalog: CatalogConfig,
    /// Identity provider configuration
    pub auth: AuthConfig,
    /// Object storage configuration
    pub storage: StorageConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
}

/// Remote document store configuration (write access).
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Document store endpoint
    pub api_base: String,
    /// Project id the product documents live under
    pub project_id: String,
    /// Web API key
    pub api_key: String,
}

/// Identity provider configuration (email/password sign-in).
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Identity provider endpoint
    pub api_base: String,
    /// Web API key
    pub api_key: String,
}

/// Object storage configuration (product image uploads).
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Object storage endpoint
    pub api_base: String,
    /// Bucket holding product images
    pub bucket: String,
    /// Service key with write access
    pub service_key: SecretString,
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if the session secret fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("ADMIN_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("ADMIN_PORT", "3001")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_PORT".to_string(), e.to_string()))?;
        let base_url = get_required_env("ADMIN_BASE_URL")?;
        let session_secret = get_session_secret("ADMIN_SESSION_SECRET")?;

        Ok(Self {
            host,
            port,
            base_url,
            session_secret,
            catalog: CatalogConfig::from_env()?,
            auth: AuthConfig::from_env()?,
            storage: StorageConfig::from_env()?,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl CatalogConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_base: get_env_or_default("CATALOG_API_BASE", "https://firestore.googleapis.com"),
            project_id: get_required_env("CATALOG_PROJECT_ID")?,
            api_key: get_required_env("CATALOG_API_KEY")?,
        })
    }
}

impl AuthConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_base: get_env_or_default("AUTH_API_BASE", "https://identitytoolkit.googleapis.com"),
            api_key: get_required_env("AUTH_API_KEY")?,
        })
    }
}

impl StorageConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_base: get_required_env("STORAGE_API_BASE")?,
            bucket: get_env_or_default("STORAGE_BUCKET", "product-images"),
            service_key: SecretString::from(get_required_env("STORAGE_SERVICE_KEY")?),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Load and validate the session signing secret.
fn get_session_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;

    if value.len() < MIN_SESSION_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            key.to_string(),
            format!(
                "must be at least {MIN_SESSION_SECRET_LENGTH} characters (got {})",
                value.len()
            ),
        ));
    }

    let lower = value.to_lowercase();
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                key.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    let entropy = shannon_entropy(&value);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            key.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated secret."
            ),
        ));
    }

    Ok(SecretString::from(value))
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // secret lengths are tiny
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)]
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_shannon_entropy_low_for_repeats() {
        assert!(shannon_entropy("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa") < MIN_ENTROPY_BITS_PER_CHAR);
    }

    #[test]
    fn test_shannon_entropy_high_for_random() {
        assert!(shannon_entropy("aB3$xY9!mK2@nL5#qR8%tW1&vZ4*uE7(") > MIN_ENTROPY_BITS_PER_CHAR);
    }

    #[test]
    fn test_placeholder_patterns_match_case_insensitively() {
        let lower = "CHANGEME-please-0123456789-0123456789".to_lowercase();
        assert!(PLACEHOLDER_PATTERNS.iter().any(|p| lower.contains(p)));
    }
}

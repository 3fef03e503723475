//! Identity provider client for admin sign-in.
//!
//! Delegates email/password verification to the hosted identity provider's
//! REST endpoint. No credentials are stored locally; a successful sign-in
//! yields the provider's account id and id token.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::instrument;

use crate::config::AuthConfig;

/// Request timeout for identity provider calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors from the identity provider.
#[derive(Debug, Error)]
pub enum AuthError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider rejected the credentials.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The provider returned an unexpected error.
    #[error("identity provider error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Failed to parse the provider response.
    #[error("response parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A verified admin sign-in.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedInAccount {
    /// Provider-issued id token.
    pub id_token: String,
    /// Account email as the provider knows it.
    pub email: String,
    /// Provider account id.
    pub local_id: String,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct SignInRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

/// Client for the hosted identity provider.
#[derive(Debug, Clone)]
pub struct AuthClient {
    client: reqwest::Client,
    sign_in_url: String,
    api_key: String,
}

impl AuthClient {
    /// Create a new identity provider client.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &AuthConfig) -> Result<Self, AuthError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            sign_in_url: format!(
                "{}/v1/accounts:signInWithPassword",
                config.api_base.trim_end_matches('/')
            ),
            api_key: config.api_key.clone(),
        })
    }

    /// Verify an email/password pair against the identity provider.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` when the provider rejects the
    /// pair, and transport or API errors otherwise.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<SignedInAccount, AuthError> {
        let response = self
            .client
            .post(&self.sign_in_url)
            .query(&[("key", self.api_key.as_str())])
            .json(&SignInRequest {
                email,
                password,
                return_secure_token: true,
            })
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let account = response.json::<SignedInAccount>().await?;
            return Ok(account);
        }

        // The provider reports all credential failures as 400 with a coded
        // message (EMAIL_NOT_FOUND, INVALID_PASSWORD, INVALID_LOGIN_CREDENTIALS).
        let body = response.text().await.unwrap_or_default();
        if status == reqwest::StatusCode::BAD_REQUEST {
            tracing::debug!(body = %body.chars().take(200).collect::<String>(), "sign-in rejected");
            return Err(AuthError::InvalidCredentials);
        }

        Err(AuthError::Api {
            status: status.as_u16(),
            message: body.chars().take(200).collect(),
        })
    }
}

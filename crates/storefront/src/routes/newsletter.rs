//! Newsletter subscription route handlers.
//!
//! There is no mailing provider wired up yet; subscriptions are validated,
//! logged, and acknowledged so the address is recoverable from the logs
//! until a provider integration lands.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, response::IntoResponse};
use serde::Deserialize;
use tracing::instrument;

/// Newsletter subscription form data.
#[derive(Debug, Deserialize)]
pub struct SubscribeForm {
    pub email: String,
}

/// Success fragment template (replaces the form via HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "newsletter/subscribe_success.html")]
pub struct SubscribeSuccessTemplate {
    pub email: String,
}

/// Error fragment template (replaces the form via HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "newsletter/subscribe_error.html")]
pub struct SubscribeErrorTemplate {
    pub message: String,
    pub email: String,
}

/// Subscribe to the newsletter (HTMX).
#[instrument(fields(email = %form.email))]
pub async fn subscribe(Form(form): Form<SubscribeForm>) -> impl IntoResponse {
    let email = form.email.trim().to_lowercase();

    if !is_valid_email(&email) {
        return SubscribeErrorTemplate {
            message: "Please enter a valid email address.".to_string(),
            email,
        }
        .into_response();
    }

    tracing::info!(email = %email, "newsletter subscription received");

    SubscribeSuccessTemplate { email }.into_response()
}

/// Basic email validation.
fn is_valid_email(email: &str) -> bool {
    // Simple validation: contains @, has content before and after @
    let mut parts = email.splitn(2, '@');
    let Some(local) = parts.next() else {
        return false;
    };
    let Some(domain) = parts.next() else {
        return false;
    };
    !local.is_empty() && !domain.is_empty() && domain.contains('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("test@example.com"));
        assert!(is_valid_email("user.name@domain.co.uk"));
        assert!(is_valid_email("a@b.c"));

        assert!(!is_valid_email(""));
        assert!(!is_valid_email("@"));
        assert!(!is_valid_email("test@"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("test@domain")); // no TLD
        assert!(!is_valid_email("test"));
    }
}

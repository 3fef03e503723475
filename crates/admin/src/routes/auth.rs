//! Authentication route handlers for admin.
//!
//! Email/password sign-in delegated to the hosted identity provider.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::{clear_current_admin, set_current_admin};
use crate::models::CurrentAdmin;
use crate::services::AuthError;
use crate::state::AppState;

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginPageTemplate {
    pub error: Option<String>,
    pub email: String,
}

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Render the login page.
///
/// GET /auth/login
pub async fn login_page() -> impl IntoResponse {
    LoginPageTemplate {
        error: None,
        email: String::new(),
    }
}

/// Verify credentials and start an admin session.
///
/// POST /auth/login
#[instrument(skip(state, session, form), fields(email = %form.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<axum::response::Response> {
    let email = form.email.trim().to_lowercase();

    match state.auth().sign_in(&email, &form.password).await {
        Ok(account) => {
            let admin = CurrentAdmin {
                account_id: account.local_id,
                email: account.email,
            };
            set_current_admin(&session, &admin)
                .await
                .map_err(|e| AppError::Internal(e.to_string()))?;

            tracing::info!(email = %admin.email, "admin signed in");
            Ok(Redirect::to("/").into_response())
        }
        Err(AuthError::InvalidCredentials) => {
            tracing::warn!(email = %email, "sign-in rejected");
            Ok(LoginPageTemplate {
                error: Some("Invalid email or password.".to_string()),
                email,
            }
            .into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// Logout and clear session.
///
/// POST /auth/logout
#[instrument(skip(session))]
pub async fn logout(session: Session) -> impl IntoResponse {
    if let Err(e) = clear_current_admin(&session).await {
        tracing::warn!(error = %e, "failed to clear admin session");
    }

    Redirect::to("/auth/login")
}

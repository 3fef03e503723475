//! HTTP middleware for the admin site.

mod auth;
mod session;

pub use auth::{RequireAdminAuth, clear_current_admin, set_current_admin};
pub use session::create_session_layer;

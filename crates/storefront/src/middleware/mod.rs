//! HTTP middleware for the storefront.

mod session;

pub use session::create_session_layer;

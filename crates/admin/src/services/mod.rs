//! Clients for the remote services the admin writes to.

pub mod auth;
pub mod catalog;
pub mod storage;

pub use auth::{AuthClient, AuthError};
pub use catalog::{CatalogError, CatalogWriter};
pub use storage::{StorageClient, StorageError};

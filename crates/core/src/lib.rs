//! Infinity Vibe Core - Shared types library.
//!
//! This crate provides common types used across all Infinity Vibe components:
//! - `storefront` - Public-facing brand site and catalog
//! - `admin` - Internal administration panel
//!
//! # Architecture
//!
//! The core crate contains only types and conversions - no I/O, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product identifiers and catalog records
//! - [`document`] - Wire representation of remote catalog documents

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod document;
pub mod types;

pub use document::{Document, DocumentError, Value, product_fields};
pub use types::*;

//! Shared domain types.

mod id;
mod product;

pub use id::ProductId;
pub use product::Product;

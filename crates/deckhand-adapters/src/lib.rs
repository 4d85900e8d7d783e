//! Infrastructure adapters for Deckhand.
//!
//! This crate implements the ports defined in `deckhand-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod catalog;
pub mod http;

// Re-export commonly used adapters
pub use catalog::InMemoryCatalog;
pub use http::HttpCatalogAuthority;

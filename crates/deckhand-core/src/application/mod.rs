//! Application layer for Deckhand.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (CatalogService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! catalog rules itself. Those live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{CatalogService, WaitPolicy};

// Re-export port traits (for adapter implementation)
pub use ports::CatalogAuthority;

pub use error::ApplicationError;

//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "list the catalog" or "deploy a template".

pub mod catalog_service;

pub use catalog_service::{CatalogService, WaitPolicy};

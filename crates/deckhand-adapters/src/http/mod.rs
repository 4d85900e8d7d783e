//! HTTP adapter for the catalog authority.
//!
//! Speaks the JSON contract:
//!
//! ```text
//! GET  /templates              -> [{id, name, description}]
//! POST /deployments            {templateId} -> {requestId, status}
//! GET  /deployments/{id}       -> {status, error?}
//! ```

mod client;
mod error;
mod wire;

pub use client::HttpCatalogAuthority;
pub use error::{ClientError, Endpoint};

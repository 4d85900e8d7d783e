//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `deckhand-adapters` crate provides implementations.

use async_trait::async_trait;

use crate::domain::{RequestId, StatusReport, SubmissionReceipt, TemplateId, TemplateRecord};
use crate::error::DeckhandResult;

/// Port for the external template/deployment authority.
///
/// Implemented by:
/// - `deckhand_adapters::HttpCatalogAuthority` (production, JSON over HTTP)
/// - `deckhand_adapters::InMemoryCatalog` (built-in catalog, testing)
///
/// ## Contract
///
/// - Transport failures are reported as `ApplicationError::Unavailable`.
/// - Answers are returned raw (records, receipts, reports); validation is
///   the application layer's job so every adapter gets the same rules.
/// - `submit_deployment` has a real side effect. Implementations must not
///   retry it.
/// - Dropping a returned future abandons the call; it does not undo a
///   submission the backend already accepted.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogAuthority: Send + Sync {
    /// Fetch the current catalog.
    async fn fetch_templates(&self) -> DeckhandResult<Vec<TemplateRecord>>;

    /// Submit a deployment of `template_id`.
    async fn submit_deployment(&self, template_id: TemplateId) -> DeckhandResult<SubmissionReceipt>;

    /// Query the status of a submitted deployment.
    ///
    /// Returns `ApplicationError::NotFound` for requests the backend does
    /// not know.
    async fn deployment_status(&self, request_id: &RequestId) -> DeckhandResult<StatusReport>;
}

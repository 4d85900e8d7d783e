// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Deckhand.
//!
//! This module contains pure catalog and deployment rules. All network
//! concerns are handled via ports (traits) defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No network or filesystem calls
//! - **Immutable snapshots**: A catalog snapshot is replaced, never edited
//! - **Validated at the edge**: Authority data enters as records and leaves
//!   as entities only after validation
//!
pub mod entities;
pub mod error;

mod validation;

pub use entities::{
    CatalogSnapshot, DeploymentRequest, DeploymentStatus, ReportedStatus, RequestId,
    StatusReport, SubmissionReceipt, Template, TemplateId, TemplateRecord,
};

pub use error::DomainError;

pub use validation::DomainValidator;

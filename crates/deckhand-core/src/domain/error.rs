// ============================================================================
// domain/error.rs - CATALOG RULE VIOLATIONS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// Cloneable so callers may keep one next to a request handle. Outside of
/// argument parsing these surface as `ApplicationError::MalformedData`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Record Validation (what the authority reported is unusable)
    // ========================================================================
    #[error("Catalog record #{index} is missing required field '{field}'")]
    MissingRequiredField { index: usize, field: &'static str },

    #[error("Catalog record #{index} has an empty '{field}'")]
    EmptyField { index: usize, field: &'static str },

    #[error("Template id {id} appears more than once in the catalog")]
    DuplicateTemplate { id: u64 },

    #[error("Template id must be a positive integer, got {0}")]
    InvalidTemplateId(u64),

    #[error("Deployment request id must not be empty")]
    EmptyRequestId,

    #[error("Deployment request id '{0}' is not a single path segment")]
    DotSegmentRequestId(String),

    #[error("Unrecognised deployment status '{0}'")]
    UnknownStatus(String),

    // ========================================================================
    // Lifecycle Violations
    // ========================================================================
    #[error("Deployment status cannot move from {from} to {to}")]
    InvalidTransition { from: String, to: String },
}

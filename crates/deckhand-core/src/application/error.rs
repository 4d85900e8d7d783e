//! Application layer errors.
//!
//! These are the failures a caller of the catalog service has to tell apart:
//! transient (retry with backoff) versus permanent (fix something first).
//! Rule violations inside authority data are `DomainError`s and are folded
//! into [`ApplicationError::MalformedData`] by the service.

use thiserror::Error;

use crate::domain::DomainError;
use crate::error::ErrorCategory;

/// Errors that occur while talking to the catalog authority.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// The authority could not be reached (connection refused, timeout, 5xx).
    #[error("Catalog authority unavailable: {reason}")]
    Unavailable { reason: String },

    /// The authority answered, but not with data we can use.
    #[error("Malformed data from catalog authority: {reason}")]
    MalformedData { reason: String },

    /// The template is not in the last fetched catalog (or the backend no
    /// longer knows it).
    #[error("Unknown template: {id}")]
    UnknownTemplate { id: u64 },

    /// The backend does not know this deployment request.
    #[error("Deployment request not found: {request_id}")]
    NotFound { request_id: String },

    /// The backend refused the call for a reason outside the taxonomy above.
    #[error("Request rejected by catalog authority (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    /// Waiting for a deployment outcome ran past its deadline.
    #[error("Deployment {request_id} still pending after {waited_secs}s")]
    WaitTimedOut { request_id: String, waited_secs: u64 },
}

impl ApplicationError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn malformed(reason: impl ToString) -> Self {
        Self::MalformedData {
            reason: reason.to_string(),
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Unavailable { .. } => vec![
                "The catalog backend could not be reached".into(),
                "Check --catalog-url or catalog.base_url in your config".into(),
                "This is usually transient; retry in a moment".into(),
            ],
            Self::MalformedData { reason } => vec![
                format!("Backend data problem: {}", reason),
                "Retrying will not help until the backend is fixed".into(),
            ],
            Self::UnknownTemplate { id } => vec![
                format!("Template {} is not in the current catalog", id),
                "Try: deckhand list to see available templates".into(),
                "The template may have been retired since the catalog was loaded".into(),
            ],
            Self::NotFound { request_id } => vec![
                format!("The backend has no deployment '{}'", request_id),
                "Deployment records expire; the request may be too old".into(),
            ],
            Self::Rejected { status, .. } => vec![
                format!("The backend answered HTTP {}", status),
                "Check the message above for the reason".into(),
            ],
            Self::WaitTimedOut { request_id, .. } => vec![
                "The deployment is still running on the backend".into(),
                format!("Check on it later with: deckhand status {}", request_id),
                "Or wait longer with --timeout".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Unavailable { .. } => ErrorCategory::Unavailable,
            Self::MalformedData { .. } => ErrorCategory::MalformedData,
            Self::UnknownTemplate { .. } | Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::Rejected { .. } => ErrorCategory::Rejected,
            Self::WaitTimedOut { .. } => ErrorCategory::TimedOut,
        }
    }
}

impl From<DomainError> for ApplicationError {
    fn from(err: DomainError) -> Self {
        Self::malformed(err)
    }
}

//! Unified error handling for Deckhand Core.
//!
//! This module provides a unified error type that wraps application errors
//! (domain rule violations arrive folded into them), with user-actionable
//! suggestions.

use thiserror::Error;

use crate::application::ApplicationError;

/// Root error type for Deckhand Core operations.
///
/// This enum wraps all possible errors that can occur when using deckhand-core,
/// providing a unified interface for error handling.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DeckhandError {
    /// Errors from the application layer (talking to the authority).
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl DeckhandError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your setup and try again".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in Deckhand".into(),
                "Please report this issue at: https://github.com/cosecruz/deckhand/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Check if this error is retryable.
    ///
    /// Only an unreachable authority is. Everything else needs a change
    /// somewhere (catalog refresh, backend fix, different input) first.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Application(ApplicationError::Unavailable { .. }))
    }

    /// The application error inside, if any.
    pub fn as_application(&self) -> Option<&ApplicationError> {
        match self {
            Self::Application(e) => Some(e),
            _ => None,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    MalformedData,
    NotFound,
    Unavailable,
    Rejected,
    TimedOut,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type DeckhandResult<T> = Result<T, DeckhandError>;

/// Extension trait for adding context to errors.
pub trait Context<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> DeckhandResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> DeckhandResult<T> {
        self.map_err(|e| DeckhandError::Internal {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}

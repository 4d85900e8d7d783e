//! Deployment requests and their lifecycle.
//!
//! ```text
//!            ┌──────────┐
//!   deploy ─►│ Pending  │──┐ (re-reported any number of times)
//!            └────┬─────┘◄─┘
//!         ┌───────┴────────┐
//!         ▼                ▼
//!   ┌───────────┐    ┌──────────┐
//!   │ Succeeded │    │  Failed  │   terminal: may be re-reported, never left
//!   └───────────┘    └──────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::template::TemplateId;
use crate::domain::error::DomainError;

// ============================================================================
// RequestId
// ============================================================================

/// Opaque identifier the backend assigns to an accepted deployment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RequestId(String);

impl RequestId {
    /// A request id is addressed as one URL path segment, so it may not be
    /// blank and may not be `.` or `..`.
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(DomainError::EmptyRequestId);
        }
        if id == "." || id == ".." {
            return Err(DomainError::DotSegmentRequestId(id));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RequestId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl FromStr for RequestId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl From<RequestId> for String {
    fn from(id: RequestId) -> Self {
        id.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// DeploymentStatus
// ============================================================================

/// Status of a deployment as reported by the authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeploymentStatus {
    Pending,
    Succeeded,
    Failed,
}

impl DeploymentStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Whether the lifecycle allows moving from `self` to `next`.
    pub fn can_transition_to(self, next: Self) -> bool {
        match self {
            Self::Pending => true,
            terminal => terminal == next,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Succeeded => "Succeeded",
            Self::Failed => "Failed",
        }
    }
}

impl FromStr for DeploymentStatus {
    type Err = DomainError;

    /// Exact wire spelling only; anything else is a contract violation.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Succeeded" => Ok(Self::Succeeded),
            "Failed" => Ok(Self::Failed),
            other => Err(DomainError::UnknownStatus(other.to_string())),
        }
    }
}

impl fmt::Display for DeploymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Authority reports
// ============================================================================

/// What the authority answered to a deployment submission, unvalidated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub request_id: Option<String>,
    pub status: Option<String>,
}

/// What the authority answered to a status query, unvalidated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusReport {
    pub status: Option<String>,
    pub error: Option<String>,
}

impl StatusReport {
    pub fn new(status: DeploymentStatus) -> Self {
        Self {
            status: Some(status.to_string()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            status: Some(DeploymentStatus::Failed.to_string()),
            error: Some(error.into()),
        }
    }

    /// Validate the report.
    pub fn validate(&self) -> Result<ReportedStatus, DomainError> {
        let status = self
            .status
            .as_deref()
            .ok_or(DomainError::UnknownStatus(String::new()))?
            .parse()?;
        Ok(ReportedStatus {
            status,
            error: self.error.clone(),
        })
    }
}

/// A validated status report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportedStatus {
    pub status: DeploymentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ============================================================================
// DeploymentRequest
// ============================================================================

/// A tracked instance of applying a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeploymentRequest {
    pub request_id: RequestId,
    pub template_id: TemplateId,
    pub submitted_at: DateTime<Utc>,
    status: DeploymentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl DeploymentRequest {
    /// A freshly accepted request; always starts `Pending`.
    pub fn new(
        request_id: RequestId,
        template_id: TemplateId,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            request_id,
            template_id,
            submitted_at,
            status: DeploymentStatus::Pending,
            error: None,
        }
    }

    /// Validate a submission receipt into a request handle.
    ///
    /// A missing status is read as `Pending`. A backend that already reports
    /// a terminal status is honoured rather than rejected: the deployment was
    /// accepted and rejecting the receipt would invite a duplicate submit.
    pub fn from_receipt(
        receipt: SubmissionReceipt,
        template_id: TemplateId,
        submitted_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let request_id = RequestId::new(receipt.request_id.unwrap_or_default())?;
        let mut request = Self::new(request_id, template_id, submitted_at);
        if let Some(status) = receipt.status.as_deref() {
            request.transition(status.parse()?, None)?;
        }
        Ok(request)
    }

    pub fn status(&self) -> DeploymentStatus {
        self.status
    }

    /// Failure message reported alongside a `Failed` status.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Apply a validated status report, enforcing the lifecycle.
    pub fn apply(&mut self, reported: &ReportedStatus) -> Result<(), DomainError> {
        self.transition(reported.status, reported.error.clone())
    }

    fn transition(
        &mut self,
        next: DeploymentStatus,
        error: Option<String>,
    ) -> Result<(), DomainError> {
        if !self.status.can_transition_to(next) {
            return Err(DomainError::InvalidTransition {
                from: self.status.to_string(),
                to: next.to_string(),
            });
        }
        self.status = next;
        if next == DeploymentStatus::Failed && error.is_some() {
            self.error = error;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> DeploymentRequest {
        DeploymentRequest::new(
            RequestId::new("req-1").unwrap(),
            TemplateId::new(1).unwrap(),
            Utc::now(),
        )
    }

    #[test]
    fn request_id_must_not_be_blank() {
        assert_eq!(RequestId::new("  "), Err(DomainError::EmptyRequestId));
        assert_eq!(RequestId::new("abc").unwrap().as_str(), "abc");
    }

    #[test]
    fn request_id_must_not_be_a_dot_segment() {
        for dots in [".", ".."] {
            assert_eq!(
                RequestId::new(dots),
                Err(DomainError::DotSegmentRequestId(dots.into()))
            );
        }
        assert!(RequestId::new("...").is_ok());
        assert!(RequestId::new("req..1").is_ok());
        assert!("..".parse::<RequestId>().is_err());
    }

    #[test]
    fn status_parsing_is_exact() {
        assert_eq!(
            "Succeeded".parse::<DeploymentStatus>().unwrap(),
            DeploymentStatus::Succeeded
        );
        assert!("succeeded".parse::<DeploymentStatus>().is_err());
        assert!("Running".parse::<DeploymentStatus>().is_err());
    }

    fn reported(report: StatusReport) -> ReportedStatus {
        report.validate().unwrap()
    }

    #[test]
    fn pending_moves_to_terminal() {
        let mut r = request();
        r.apply(&reported(StatusReport::new(DeploymentStatus::Pending)))
            .unwrap();
        assert_eq!(r.status(), DeploymentStatus::Pending);

        r.apply(&reported(StatusReport::failed("quota exceeded")))
            .unwrap();
        assert_eq!(r.status(), DeploymentStatus::Failed);
        assert_eq!(r.error(), Some("quota exceeded"));
        assert!(r.is_terminal());
    }

    #[test]
    fn terminal_status_is_sticky() {
        let mut r = request();
        r.apply(&reported(StatusReport::new(DeploymentStatus::Succeeded)))
            .unwrap();
        // Same terminal state again is fine.
        r.apply(&reported(StatusReport::new(DeploymentStatus::Succeeded)))
            .unwrap();

        let err = r
            .apply(&reported(StatusReport::new(DeploymentStatus::Pending)))
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition { .. }));
        assert_eq!(r.status(), DeploymentStatus::Succeeded);
    }

    #[test]
    fn missing_status_in_report_is_unknown() {
        let err = StatusReport::default().validate().unwrap_err();
        assert!(matches!(err, DomainError::UnknownStatus(_)));
    }

    #[test]
    fn report_keeps_error_message() {
        let view = StatusReport::failed("image pull backoff").validate().unwrap();
        assert_eq!(view.status, DeploymentStatus::Failed);
        assert_eq!(view.error.as_deref(), Some("image pull backoff"));
    }

    #[test]
    fn receipt_without_status_is_pending() {
        let r = DeploymentRequest::from_receipt(
            SubmissionReceipt {
                request_id: Some("abc".into()),
                status: None,
            },
            TemplateId::new(2).unwrap(),
            Utc::now(),
        )
        .unwrap();
        assert_eq!(r.status(), DeploymentStatus::Pending);
        assert_eq!(r.request_id.as_str(), "abc");
    }

    #[test]
    fn receipt_without_request_id_is_rejected() {
        let err = DeploymentRequest::from_receipt(
            SubmissionReceipt {
                request_id: None,
                status: Some("Pending".into()),
            },
            TemplateId::new(2).unwrap(),
            Utc::now(),
        )
        .unwrap_err();
        assert_eq!(err, DomainError::EmptyRequestId);
    }
}

use chrono::{DateTime, Utc};

use crate::domain::{
    entities::{
        CatalogSnapshot, DeploymentRequest, ReportedStatus, StatusReport, SubmissionReceipt,
        TemplateId, TemplateRecord,
    },
    error::DomainError,
};

/// Centralized domain validation.
///
/// Everything the authority sends passes through here before the
/// application layer trusts it.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_catalog(
        records: Vec<TemplateRecord>,
        fetched_at: DateTime<Utc>,
    ) -> Result<CatalogSnapshot, DomainError> {
        CatalogSnapshot::from_records(records, fetched_at)
    }

    pub fn validate_receipt(
        receipt: SubmissionReceipt,
        template_id: TemplateId,
        submitted_at: DateTime<Utc>,
    ) -> Result<DeploymentRequest, DomainError> {
        DeploymentRequest::from_receipt(receipt, template_id, submitted_at)
    }

    pub fn validate_status_report(report: &StatusReport) -> Result<ReportedStatus, DomainError> {
        report.validate()
    }
}

//! Wire shapes of the authority's JSON contract.
//!
//! Every field is optional here; presence and content are checked by the
//! domain validator so that a bad payload is reported as malformed data
//! rather than as a decode failure of the whole response.

use serde::{Deserialize, Serialize};

use deckhand_core::domain::{StatusReport, SubmissionReceipt, TemplateRecord};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TemplateDto {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub description: Option<String>,
}

impl From<TemplateDto> for TemplateRecord {
    fn from(dto: TemplateDto) -> Self {
        TemplateRecord {
            id: dto.id,
            name: dto.name,
            description: dto.description,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DeployBody {
    pub template_id: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReceiptDto {
    pub request_id: Option<String>,
    pub status: Option<String>,
}

impl From<ReceiptDto> for SubmissionReceipt {
    fn from(dto: ReceiptDto) -> Self {
        SubmissionReceipt {
            request_id: dto.request_id,
            status: dto.status,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StatusDto {
    pub status: Option<String>,
    pub error: Option<String>,
}

impl From<StatusDto> for StatusReport {
    fn from(dto: StatusDto) -> Self {
        StatusReport {
            status: dto.status,
            error: dto.error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deploy_body_uses_camel_case() {
        let body = serde_json::to_value(DeployBody { template_id: 7 }).unwrap();
        assert_eq!(body, serde_json::json!({ "templateId": 7 }));
    }

    #[test]
    fn missing_fields_decode_as_none() {
        let dto: TemplateDto = serde_json::from_str(r#"{"id": 3}"#).unwrap();
        let record = TemplateRecord::from(dto);
        assert_eq!(record.id, Some(3));
        assert!(record.name.is_none());
        assert!(record.description.is_none());
    }

    #[test]
    fn receipt_reads_request_id() {
        let dto: ReceiptDto =
            serde_json::from_str(r#"{"requestId": "req-1", "status": "Pending"}"#).unwrap();
        let receipt = SubmissionReceipt::from(dto);
        assert_eq!(receipt.request_id.as_deref(), Some("req-1"));
        assert_eq!(receipt.status.as_deref(), Some("Pending"));
    }

    #[test]
    fn status_error_is_optional() {
        let dto: StatusDto = serde_json::from_str(r#"{"status": "Succeeded"}"#).unwrap();
        let report = StatusReport::from(dto);
        assert_eq!(report.status.as_deref(), Some("Succeeded"));
        assert!(report.error.is_none());
    }
}

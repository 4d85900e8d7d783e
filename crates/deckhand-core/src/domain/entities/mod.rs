pub mod catalog;
pub mod deployment;
pub mod template;

pub use catalog::CatalogSnapshot;
pub use deployment::{
    DeploymentRequest, DeploymentStatus, ReportedStatus, RequestId, StatusReport,
    SubmissionReceipt,
};
pub use template::{Template, TemplateId, TemplateRecord};

//! Templates that ship with Deckhand.
//!
//! This is the catalog the dashboard has always offered. It backs
//! `--offline` mode and seeds [`InMemoryCatalog`](super::InMemoryCatalog).

use deckhand_core::domain::TemplateRecord;

pub const GPU_TRAINING: u64 = 1;
pub const BACKUP_WORKFLOW: u64 = 2;
pub const CLUSTER_SCALE: u64 = 3;

/// All built-in templates, in catalog order.
pub fn all_templates() -> Vec<TemplateRecord> {
    vec![
        TemplateRecord::new(
            GPU_TRAINING,
            "GPU Job - Training",
            "Submit a training job on GPU cluster.",
        ),
        TemplateRecord::new(BACKUP_WORKFLOW, "Backup Workflow", "Trigger cluster backup."),
        TemplateRecord::new(
            CLUSTER_SCALE,
            "Cluster Scale Template",
            "Add/remove nodes automatically.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use deckhand_core::domain::CatalogSnapshot;

    use super::*;

    #[test]
    fn builtin_catalog_is_valid() {
        let snapshot = CatalogSnapshot::from_records(all_templates(), Utc::now()).unwrap();
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot.templates()[0].name, "GPU Job - Training");
    }
}

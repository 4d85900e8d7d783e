//! Catalog snapshot: the template list from one successful listing.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use super::template::{Template, TemplateId, TemplateRecord};
use crate::domain::error::DomainError;

/// Immutable view of the catalog as of `fetched_at`.
///
/// Snapshots are replaced whole, never edited. Deploy requests are only
/// accepted for templates contained in the current snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSnapshot {
    templates: Vec<Template>,
    fetched_at: DateTime<Utc>,
}

impl CatalogSnapshot {
    /// Build a snapshot from validated templates.
    ///
    /// Fails if two templates share an id.
    pub fn new(templates: Vec<Template>, fetched_at: DateTime<Utc>) -> Result<Self, DomainError> {
        let mut seen = HashSet::with_capacity(templates.len());
        for t in &templates {
            if !seen.insert(t.id) {
                return Err(DomainError::DuplicateTemplate { id: t.id.get() });
            }
        }
        Ok(Self {
            templates,
            fetched_at,
        })
    }

    /// Validate raw authority records into a snapshot.
    ///
    /// The first invalid record fails the whole listing.
    pub fn from_records(
        records: Vec<TemplateRecord>,
        fetched_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let templates = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| record.validate(index))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(templates, fetched_at)
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    pub fn get(&self, id: TemplateId) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: TemplateId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u64) -> TemplateId {
        TemplateId::new(n).unwrap()
    }

    #[test]
    fn lookup_by_id() {
        let snap = CatalogSnapshot::from_records(
            vec![
                TemplateRecord::new(1, "GPU Job - Training", ""),
                TemplateRecord::new(2, "Backup Workflow", ""),
            ],
            Utc::now(),
        )
        .unwrap();

        assert_eq!(snap.len(), 2);
        assert!(snap.contains(id(2)));
        assert!(!snap.contains(id(99)));
        assert_eq!(snap.get(id(1)).unwrap().name, "GPU Job - Training");
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = CatalogSnapshot::from_records(
            vec![
                TemplateRecord::new(1, "a", ""),
                TemplateRecord::new(1, "b", ""),
            ],
            Utc::now(),
        )
        .unwrap_err();
        assert_eq!(err, DomainError::DuplicateTemplate { id: 1 });
    }

    #[test]
    fn one_bad_record_fails_the_listing() {
        let err = CatalogSnapshot::from_records(
            vec![
                TemplateRecord::new(1, "a", ""),
                TemplateRecord {
                    id: Some(2),
                    name: None,
                    description: None,
                },
            ],
            Utc::now(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            DomainError::MissingRequiredField { index: 1, field: "name" }
        ));
    }

    #[test]
    fn empty_catalog_is_valid() {
        let snap = CatalogSnapshot::from_records(Vec::new(), Utc::now()).unwrap();
        assert!(snap.is_empty());
    }
}

//! Catalog templates.
//!
//! A [`Template`] is a reusable deployment definition owned by the external
//! catalog authority. This crate never creates or retires templates; it only
//! reads them. What the authority sends is first captured as a
//! [`TemplateRecord`] (every field optional, exactly as reported) and then
//! validated into a [`Template`].
//!
//! ```text
//! authority ──► TemplateRecord ──validate──► Template
//!                 (untrusted)                  (id > 0, name non-empty)
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

// ============================================================================
// TemplateId
// ============================================================================

/// Unique, immutable identifier of a catalog template.
///
/// Invariant: never zero. Enforced at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct TemplateId(u64);

impl TemplateId {
    /// Fallible constructor.
    pub fn new(id: u64) -> Result<Self, DomainError> {
        if id == 0 {
            Err(DomainError::InvalidTemplateId(id))
        } else {
            Ok(Self(id))
        }
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl TryFrom<u64> for TemplateId {
    type Error = DomainError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TemplateId> for u64 {
    fn from(id: TemplateId) -> Self {
        id.0
    }
}

impl FromStr for TemplateId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s
            .trim()
            .parse::<u64>()
            .map_err(|_| DomainError::InvalidTemplateId(0))?;
        Self::new(raw)
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Template
// ============================================================================

/// A deployable template offered in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Template {
    pub id: TemplateId,
    pub name: String,
    pub description: String,
}

impl Template {
    /// Build a template from already-trusted parts (built-in catalogs, tests).
    ///
    /// Untrusted input goes through [`TemplateRecord::validate`] instead.
    pub fn new(
        id: TemplateId,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.id, self.name)
    }
}

// ============================================================================
// TemplateRecord
// ============================================================================

/// A catalog entry exactly as reported by the authority.
///
/// Adapters fill this from whatever they read (JSON, memory); the application
/// layer validates it. Keeping the fields optional means a missing `name` is
/// reported as a domain error with the record's position instead of a vague
/// deserialisation failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateRecord {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub description: Option<String>,
}

impl TemplateRecord {
    pub fn new(id: u64, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: Some(name.into()),
            description: Some(description.into()),
        }
    }

    /// Validate this record, `index` being its position in the listing.
    ///
    /// `id` and `name` are required and the name must contain something other
    /// than whitespace. A missing description becomes an empty string.
    pub fn validate(self, index: usize) -> Result<Template, DomainError> {
        let raw_id = self.id.ok_or(DomainError::MissingRequiredField {
            index,
            field: "id",
        })?;
        let id = TemplateId::new(raw_id).map_err(|_| DomainError::EmptyField {
            index,
            field: "id",
        })?;

        let name = self.name.ok_or(DomainError::MissingRequiredField {
            index,
            field: "name",
        })?;
        if name.trim().is_empty() {
            return Err(DomainError::EmptyField {
                index,
                field: "name",
            });
        }

        Ok(Template {
            id,
            name,
            description: self.description.unwrap_or_default(),
        })
    }
}

//! In-memory catalog authority with built-in templates.
//!
//! Stands in for the real backend in `--offline` mode and in tests. Its
//! failure switches (outage, retired templates, failing deployments) let
//! callers exercise every branch of the error taxonomy without a network.

use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use deckhand_core::{
    application::{ApplicationError, ports::CatalogAuthority},
    domain::{
        DeploymentStatus, RequestId, StatusReport, SubmissionReceipt, TemplateId, TemplateRecord,
    },
    error::DeckhandResult,
};

use super::builtin;

/// How deployments accepted by an [`InMemoryCatalog`] end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulatedOutcome {
    Succeed,
    Fail(String),
}

impl SimulatedOutcome {
    fn report(&self) -> StatusReport {
        match self {
            Self::Succeed => StatusReport::new(DeploymentStatus::Succeeded),
            Self::Fail(message) => StatusReport::failed(message.clone()),
        }
    }
}

#[derive(Debug)]
struct Deployment {
    template_id: u64,
    polls: u32,
}

#[derive(Debug)]
struct State {
    templates: Vec<TemplateRecord>,
    deployments: HashMap<String, Deployment>,
    unavailable: bool,
    outcome: SimulatedOutcome,
    settle_after: u32,
    submissions: usize,
}

/// Thread-safe in-memory catalog authority.
///
/// Clones share state, so a test can keep a handle while the service owns
/// another.
#[derive(Debug, Clone)]
pub struct InMemoryCatalog {
    inner: Arc<RwLock<State>>,
}

impl InMemoryCatalog {
    /// Create an empty catalog.
    ///
    /// Deployments stay `Pending` for one poll and then succeed.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(State {
                templates: Vec::new(),
                deployments: HashMap::new(),
                unavailable: false,
                outcome: SimulatedOutcome::Succeed,
                settle_after: 1,
                submissions: 0,
            })),
        }
    }

    /// Create a catalog with the built-in templates loaded.
    pub fn with_builtin() -> Self {
        let catalog = Self::new();
        for record in builtin::all_templates() {
            catalog.insert(record);
        }
        catalog
    }

    /// Add a record as-is; records are not validated until listed.
    pub fn insert(&self, record: TemplateRecord) {
        self.write().templates.push(record);
    }

    /// Stop offering a template. Returns whether it was present.
    pub fn retire(&self, id: u64) -> bool {
        let mut state = self.write();
        let before = state.templates.len();
        state.templates.retain(|t| t.id != Some(id));
        state.templates.len() != before
    }

    /// Simulate an outage: every call fails as unavailable while set.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.write().unavailable = unavailable;
    }

    /// Outcome of deployments once they settle.
    pub fn set_outcome(&self, outcome: SimulatedOutcome) {
        self.write().outcome = outcome;
    }

    /// Number of status polls answered `Pending` before a deployment settles.
    pub fn settle_after(&self, polls: u32) {
        self.write().settle_after = polls;
    }

    /// Number of deployment submissions received, accepted or not.
    pub fn submissions(&self) -> usize {
        self.read().submissions
    }

    /// Get the number of templates.
    pub fn len(&self) -> usize {
        self.read().templates.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> RwLockReadGuard<'_, State> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, State> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for InMemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

fn outage() -> ApplicationError {
    ApplicationError::unavailable("in-memory catalog is marked unavailable")
}

#[async_trait]
impl CatalogAuthority for InMemoryCatalog {
    async fn fetch_templates(&self) -> DeckhandResult<Vec<TemplateRecord>> {
        let state = self.read();
        if state.unavailable {
            return Err(outage().into());
        }
        Ok(state.templates.clone())
    }

    async fn submit_deployment(
        &self,
        template_id: TemplateId,
    ) -> DeckhandResult<SubmissionReceipt> {
        let mut state = self.write();
        if state.unavailable {
            return Err(outage().into());
        }
        state.submissions += 1;

        let id = template_id.get();
        if !state.templates.iter().any(|t| t.id == Some(id)) {
            return Err(ApplicationError::UnknownTemplate { id }.into());
        }

        let request_id = format!("req-{}", Uuid::new_v4());
        state.deployments.insert(
            request_id.clone(),
            Deployment {
                template_id: id,
                polls: 0,
            },
        );
        debug!(%request_id, template_id = id, "Deployment accepted");

        Ok(SubmissionReceipt {
            request_id: Some(request_id),
            status: Some(DeploymentStatus::Pending.to_string()),
        })
    }

    async fn deployment_status(&self, request_id: &RequestId) -> DeckhandResult<StatusReport> {
        let mut state = self.write();
        if state.unavailable {
            return Err(outage().into());
        }

        let settle_after = state.settle_after;
        let outcome = state.outcome.clone();
        let deployment = state
            .deployments
            .get_mut(request_id.as_str())
            .ok_or_else(|| ApplicationError::NotFound {
                request_id: request_id.to_string(),
            })?;

        deployment.polls = deployment.polls.saturating_add(1);
        debug!(
            template_id = deployment.template_id,
            polls = deployment.polls,
            "Deployment polled"
        );

        if deployment.polls > settle_after {
            Ok(outcome.report())
        } else {
            Ok(StatusReport::new(DeploymentStatus::Pending))
        }
    }
}

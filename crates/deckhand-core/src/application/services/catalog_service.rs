//! Catalog Service - main application orchestrator.
//!
//! This service bridges a front end and the external catalog authority:
//! 1. List templates (and remember them as the current snapshot)
//! 2. Deploy a template from that snapshot
//! 3. Poll / follow the resulting deployment request
//!
//! It implements the driving port (incoming) and uses the driven
//! `CatalogAuthority` port (outgoing). Nothing here retries: a deploy that is
//! repeated provisions twice, so retry policy belongs to the caller.

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use chrono::Utc;
use tokio::time::{Instant, sleep};
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{ApplicationError, ports::CatalogAuthority},
    domain::{
        CatalogSnapshot, DeploymentRequest, DomainValidator as validator, ReportedStatus,
        RequestId, Template, TemplateId,
    },
    error::DeckhandResult,
};

/// How long and how often [`CatalogService::wait_for_outcome`] polls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
    interval: Duration,
    timeout: Duration,
}

impl WaitPolicy {
    /// Shortest gap between two status polls of the same request.
    pub const MIN_INTERVAL: Duration = Duration::from_secs(1);

    /// `interval` is raised to [`Self::MIN_INTERVAL`] if shorter.
    pub fn new(interval: Duration, timeout: Duration) -> Self {
        Self {
            interval: interval.max(Self::MIN_INTERVAL),
            timeout,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            timeout: Duration::from_secs(600),
        }
    }
}

/// Template catalog and deployment dispatch.
///
/// Holds the last successfully fetched [`CatalogSnapshot`]. The snapshot is
/// swapped as a whole under a short lock that is never held across an
/// `.await`, so concurrent readers see either the old or the new list.
pub struct CatalogService {
    authority: Box<dyn CatalogAuthority>,
    snapshot: RwLock<Option<Arc<CatalogSnapshot>>>,
}

impl CatalogService {
    /// Create a new catalog service over the given authority adapter.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use deckhand_core::application::CatalogService;
    ///
    /// let service = CatalogService::new(
    ///     authority, // impl CatalogAuthority
    /// );
    /// ```
    pub fn new(authority: Box<dyn CatalogAuthority>) -> Self {
        Self {
            authority,
            snapshot: RwLock::new(None),
        }
    }

    /// Fetch the current catalog.
    ///
    /// On success the snapshot is replaced; on failure the previous snapshot
    /// (if any) stays in place.
    #[instrument(skip_all)]
    pub async fn list_templates(&self) -> DeckhandResult<Vec<Template>> {
        let records = self.authority.fetch_templates().await?;
        debug!(records = records.len(), "Catalog records received");

        let snapshot = validator::validate_catalog(records, Utc::now()).map_err(|e| {
            warn!(error = %e, "Catalog rejected");
            ApplicationError::from(e)
        })?;

        let templates = snapshot.templates().to_vec();
        self.replace_snapshot(snapshot);

        info!(templates = templates.len(), "Catalog refreshed");
        Ok(templates)
    }

    /// The catalog as of the last successful [`Self::list_templates`].
    pub fn snapshot(&self) -> Option<Arc<CatalogSnapshot>> {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Submit a deployment of `template_id`.
    ///
    /// The id must be in the current snapshot; otherwise this fails with
    /// `UnknownTemplate` and the authority is never contacted.
    #[instrument(skip_all, fields(template_id = %template_id))]
    pub async fn deploy(&self, template_id: TemplateId) -> DeckhandResult<DeploymentRequest> {
        let known = self
            .snapshot()
            .is_some_and(|snapshot| snapshot.contains(template_id));
        if !known {
            warn!("Template not in current catalog; not submitting");
            return Err(ApplicationError::UnknownTemplate {
                id: template_id.get(),
            }
            .into());
        }

        let submitted_at = Utc::now();
        let receipt = self.authority.submit_deployment(template_id).await?;
        let request = validator::validate_receipt(receipt, template_id, submitted_at)
            .map_err(ApplicationError::from)?;

        info!(
            request_id = %request.request_id,
            status = %request.status(),
            "Deployment submitted"
        );
        Ok(request)
    }

    /// Current status of a previously submitted request.
    #[instrument(skip_all, fields(request_id = %request_id))]
    pub async fn poll_status(&self, request_id: &RequestId) -> DeckhandResult<ReportedStatus> {
        let report = self.authority.deployment_status(request_id).await?;
        let reported =
            validator::validate_status_report(&report).map_err(ApplicationError::from)?;
        debug!(status = %reported.status, "Status polled");
        Ok(reported)
    }

    /// Poll `request` once and apply the answer to it.
    ///
    /// A report that contradicts the request's lifecycle (a terminal request
    /// going back to `Pending`, say) is `MalformedData` and leaves the
    /// handle unchanged.
    pub async fn refresh(&self, request: &mut DeploymentRequest) -> DeckhandResult<()> {
        let reported = self.poll_status(&request.request_id).await?;
        request.apply(&reported).map_err(ApplicationError::from)?;
        Ok(())
    }

    /// Follow `request` until it reaches a terminal status.
    ///
    /// Polls immediately, then every `policy.interval`. The first poll error
    /// is returned as-is. Past `policy.timeout` this fails with
    /// `WaitTimedOut`; the deployment itself keeps going on the backend.
    /// A timeout too large to represent as an instant means no deadline.
    #[instrument(skip_all, fields(request_id = %request.request_id))]
    pub async fn wait_for_outcome(
        &self,
        request: &mut DeploymentRequest,
        policy: WaitPolicy,
    ) -> DeckhandResult<()> {
        let started = Instant::now();
        let deadline = started.checked_add(policy.timeout);

        while !request.is_terminal() {
            self.refresh(request).await?;
            if request.is_terminal() {
                break;
            }

            let now = Instant::now();
            let nap = match deadline {
                Some(deadline) if now >= deadline => {
                    return Err(ApplicationError::WaitTimedOut {
                        request_id: request.request_id.to_string(),
                        waited_secs: (now - started).as_secs(),
                    }
                    .into());
                }
                Some(deadline) => policy.interval.min(deadline - now),
                None => policy.interval,
            };
            sleep(nap).await;
        }

        info!(status = %request.status(), "Deployment finished");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn replace_snapshot(&self, snapshot: CatalogSnapshot) {
        let mut slot = self.snapshot.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(Arc::new(snapshot));
    }
}

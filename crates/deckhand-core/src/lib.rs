//! Deckhand Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for Deckhand, the
//! template catalog and deployment dispatch tool, following hexagonal
//! (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          deckhand-cli (CLI)             │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │            (CatalogService)             │
//! │  list / deploy / poll / wait_for_outcome│
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │        (Driven: CatalogAuthority)       │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    deckhand-adapters (Infrastructure)   │
//! │  (HttpCatalogAuthority, InMemoryCatalog)│
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (Template, CatalogSnapshot, Deployment) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use deckhand_core::{application::CatalogService, domain::TemplateId};
//!
//! // 1. Wire the service to an authority adapter
//! let service = CatalogService::new(Box::new(authority));
//!
//! // 2. Load the catalog; this also becomes the snapshot deploys check against
//! let templates = service.list_templates().await?;
//!
//! // 3. Deploy and follow the request
//! let mut request = service.deploy(TemplateId::new(1)?).await?;
//! service.wait_for_outcome(&mut request, Default::default()).await?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ApplicationError, CatalogService, WaitPolicy, ports::CatalogAuthority,
    };
    pub use crate::domain::{
        CatalogSnapshot, DeploymentRequest, DeploymentStatus, ReportedStatus, RequestId,
        StatusReport, SubmissionReceipt, Template, TemplateId, TemplateRecord,
    };
    pub use crate::error::{DeckhandError, DeckhandResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

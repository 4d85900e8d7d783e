//! Wiring: pick a catalog authority adapter from config and build the
//! service over it.

use deckhand_adapters::{HttpCatalogAuthority, InMemoryCatalog};
use deckhand_core::application::{CatalogService, ports::CatalogAuthority};
use tracing::debug;

use crate::{
    config::{AppConfig, CatalogSource},
    error::CliResult,
};

/// Build the authority adapter selected by `catalog.source`.
pub fn authority(config: &AppConfig) -> CliResult<Box<dyn CatalogAuthority>> {
    let authority: Box<dyn CatalogAuthority> = match config.catalog.source {
        CatalogSource::Builtin => {
            debug!("Using built-in catalog");
            Box::new(InMemoryCatalog::with_builtin())
        }
        CatalogSource::Remote => {
            let remote =
                HttpCatalogAuthority::new(&config.catalog.base_url, config.catalog.timeout())?;
            debug!(base_url = %remote.base_url(), "Using remote catalog");
            Box::new(remote)
        }
    };
    Ok(authority)
}

/// A [`CatalogService`] over the configured authority.
pub fn service(config: &AppConfig) -> CliResult<CatalogService> {
    Ok(CatalogService::new(authority(config)?))
}

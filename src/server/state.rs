//! Server shared state
//!
//! Holds configuration, the read-only catalog and the location provider.
//! Nothing here is specific to one visitor: each request that asks for its
//! caller's position gets a fresh `LocationSession`.

use crate::catalog::Catalog;
use crate::config::Config;
use crate::error::Result;
use crate::forms::{FormSink, LogSink};
use crate::geo::{GeolocationError, LocationResult, LocationSession, Locator};
use crate::media::ImageResolver;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Shared state for the HTTP server
pub struct AppState {
    /// Configuration
    pub config: Config,

    /// Catalog, loaded once at startup
    pub catalog: Arc<Catalog>,

    /// Provider template for `/api/location` and `here=true`
    pub locator: Locator,

    /// Timeout for a single location request
    pub location_timeout: Duration,

    /// Image URL builder
    pub images: ImageResolver,

    /// Where form submissions go
    pub forms: Box<dyn FormSink>,

    started: Instant,
}

impl AppState {
    /// Create application state, loading the configured catalog
    pub fn new(config: Config) -> Result<Self> {
        let catalog = Catalog::load(config.catalog_path().as_deref())?;
        let locator = Locator::from_config(&config);
        Ok(Self::with_parts(config, catalog, locator))
    }

    /// Create application state from already-built parts
    pub fn with_parts(config: Config, catalog: Catalog, locator: Locator) -> Self {
        let location_timeout = config.location_timeout();
        let images = ImageResolver::from_config(&config.media);
        Self {
            config,
            catalog: Arc::new(catalog),
            locator,
            location_timeout,
            images,
            forms: Box::new(LogSink),
            started: Instant::now(),
        }
    }

    /// Provider for one caller
    ///
    /// IP lookups must target the caller's address; answering with the
    /// server's own position would hand every visitor the same location.
    /// Returns None when the caller's address is unknown.
    pub fn locator_for(&self, client: Option<IpAddr>) -> Option<Locator> {
        match (&self.locator, client) {
            (Locator::Ip(ip), Some(addr)) => Some(Locator::Ip(ip.for_client(addr))),
            (Locator::Ip(_), None) => None,
            (other, _) => Some(other.clone()),
        }
    }

    /// Locate one caller with a request-scoped session
    pub async fn locate_client(
        &self,
        client: Option<IpAddr>,
    ) -> LocationResult {
        let Some(locator) = self.locator_for(client) else {
            debug!("No client address to locate");
            return Err(GeolocationError::PositionUnavailable);
        };
        LocationSession::new(locator, self.location_timeout)
            .locate()
            .await
    }

    /// Seconds since the state was created
    pub fn uptime_secs(&self) -> u64 {
        self.started.elapsed().as_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::ip_location::IpLocator;
    use crate::geo::{DeniedLocation, LocationProvider};

    fn state(locator: Locator) -> AppState {
        AppState::with_parts(Config::default(), Catalog::builtin().unwrap(), locator)
    }

    #[test]
    fn test_ip_locator_targets_each_caller() {
        let state = state(Locator::Ip(IpLocator::new()));
        let first: IpAddr = "41.215.160.10".parse().unwrap();
        let second: IpAddr = "105.112.0.1".parse().unwrap();

        for addr in [first, second] {
            match state.locator_for(Some(addr)) {
                Some(Locator::Ip(ip)) => assert_eq!(ip.target(), Some(addr)),
                other => panic!("expected IP locator, got {:?}", other),
            }
        }
        assert!(state.locator_for(None).is_none());
    }

    #[tokio::test]
    async fn test_unknown_caller_is_not_located() {
        let state = state(Locator::Ip(IpLocator::new()));
        assert_eq!(
            state.locate_client(None).await,
            Err(GeolocationError::PositionUnavailable)
        );
    }

    #[test]
    fn test_other_locators_ignore_address() {
        let state = state(Locator::Denied(DeniedLocation));
        let locator = state.locator_for(None).unwrap();
        assert_eq!(locator.name(), "disabled");
    }
}

//! Per-session location state
//!
//! Holds the user's coordinates in memory once acquired. At most one
//! request is outstanding at a time; callers arriving while a request is
//! pending wait for it rather than starting another. Failures are never
//! retried automatically; the caller re-invokes `locate` on user action.

use crate::geo::{GeoLocation, GeolocationError, LocationProvider, LocationResult};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

/// Location acquired at most once per session
pub struct LocationSession<P> {
    provider: P,
    timeout: Duration,
    current: RwLock<Option<GeoLocation>>,
    /// Held for the duration of a provider request; stores its outcome
    in_flight: Mutex<Option<LocationResult>>,
    /// Number of provider requests that have finished
    completed: AtomicU64,
}

impl<P: LocationProvider> LocationSession<P> {
    pub fn new(provider: P, timeout: Duration) -> Self {
        Self {
            provider,
            timeout,
            current: RwLock::new(None),
            in_flight: Mutex::new(None),
            completed: AtomicU64::new(0),
        }
    }

    /// Return the stored location, requesting it from the provider if needed
    ///
    /// A caller that arrives while a request is pending receives that
    /// request's outcome, success or failure.
    pub async fn locate(&self) -> LocationResult {
        if let Some(loc) = self.current().await {
            return Ok(loc);
        }

        let seen = self.completed.load(Ordering::Acquire);
        let mut last = self.in_flight.lock().await;

        if self.completed.load(Ordering::Acquire) != seen {
            if let Some(outcome) = last.as_ref() {
                return outcome.clone();
            }
        }

        let outcome = self.request().await;
        if let Ok(location) = &outcome {
            *self.current.write().await = Some(location.clone());
        }
        *last = Some(outcome.clone());
        self.completed.fetch_add(1, Ordering::Release);

        outcome
    }

    /// One provider request under the session timeout
    async fn request(&self) -> LocationResult {
        match tokio::time::timeout(self.timeout, self.provider.locate()).await {
            Ok(Ok(location)) => {
                info!("Located user at {}", location.display_name);
                Ok(location)
            }
            Ok(Err(e)) => {
                warn!("Location request via {} failed: {}", self.provider.name(), e);
                Err(e)
            }
            Err(_) => {
                warn!(
                    "Location request via {} timed out after {:?}",
                    self.provider.name(),
                    self.timeout
                );
                Err(GeolocationError::Timeout)
            }
        }
    }

    /// The stored location, without requesting one
    pub async fn current(&self) -> Option<GeoLocation> {
        self.current.read().await.clone()
    }

    /// Whether a request is currently outstanding
    pub fn is_pending(&self) -> bool {
        self.in_flight.try_lock().is_err()
    }

    /// Discard the stored location
    pub async fn clear(&self) {
        *self.current.write().await = None;
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}

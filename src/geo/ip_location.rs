//! IP-based geolocation
//!
//! Uses ip-api.com to approximate a position from an IP address. Nothing is
//! persisted: the result lives only in the caller's `LocationSession`.

use crate::constants::api::IP_API_URL;
use crate::error::{Error, Result};
use crate::geo::{GeoLocation, GeolocationError, LocationProvider, LocationResult};
use serde::Deserialize;
use std::net::IpAddr;
use tracing::debug;

/// IP location service
///
/// Without a target address ip-api.com answers for the address the request
/// comes from, which is only the user's own when running on their machine.
#[derive(Debug, Clone)]
pub struct IpLocator {
    client: reqwest::Client,
    target: Option<IpAddr>,
}

/// ip-api.com response
#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    lat: Option<f64>,
    lon: Option<f64>,
    city: Option<String>,
    #[serde(rename = "regionName")]
    region_name: Option<String>,
    country: Option<String>,
}

impl IpLocator {
    /// Locate the machine this process runs on
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            target: None,
        }
    }

    /// Locate a specific address, sharing this locator's HTTP client
    pub fn for_client(&self, ip: IpAddr) -> Self {
        Self {
            client: self.client.clone(),
            target: Some(ip),
        }
    }

    /// The address being located, if not our own
    pub fn target(&self) -> Option<IpAddr> {
        self.target
    }

    /// Request URL for the configured target
    pub fn lookup_url(&self) -> String {
        match self.target {
            Some(ip) => format!("{}/{}", IP_API_URL, ip),
            None => IP_API_URL.to_string(),
        }
    }

    /// Get the location for the target address
    pub async fn lookup(&self) -> Result<GeoLocation> {
        let response = self
            .client
            .get(self.lookup_url())
            .send()
            .await
            .map_err(|e| Error::Geocoding(format!("IP location request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Geocoding(format!(
                "IP location API returned status: {}",
                response.status()
            )));
        }

        let data: IpApiResponse = response
            .json()
            .await
            .map_err(|e| Error::Geocoding(format!("Failed to parse IP location response: {}", e)))?;

        Self::parse_response(data)
    }

    fn parse_response(data: IpApiResponse) -> Result<GeoLocation> {
        if data.status != "success" {
            return Err(Error::Geocoding("IP location lookup failed".to_string()));
        }

        let lat = data.lat.ok_or_else(|| Error::Geocoding("No latitude in response".to_string()))?;
        let lng = data.lon.ok_or_else(|| Error::Geocoding("No longitude in response".to_string()))?;

        let display_name = [data.city, data.region_name, data.country]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(", ");

        Ok(GeoLocation {
            lat,
            lng,
            display_name: if display_name.is_empty() {
                "Unknown Location".to_string()
            } else {
                display_name
            },
        })
    }
}

impl Default for IpLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl LocationProvider for IpLocator {
    fn name(&self) -> &'static str {
        "ip"
    }

    async fn locate(&self) -> LocationResult {
        self.lookup().await.map_err(|e| {
            debug!("IP lookup failed: {}", e);
            GeolocationError::PositionUnavailable
        })
    }
}

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::config::Config;

/// Failures internal to the reverse-geocoding lookup. These never cross the
/// `PositionService` boundary; the service degrades to an address-less fix.
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("geocoding request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("geocoding endpoint returned status {0}")]
    Status(u16),

    #[error("geocoding response carried no display_name")]
    MissingDisplayName,
}

/// Coordinate-to-address lookup.
#[allow(async_fn_in_trait)]
pub trait ReverseGeocoder {
    async fn display_name(&self, latitude: f64, longitude: f64) -> Result<String, GeocodeError>;
}

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    display_name: Option<String>,
}

/// Nominatim-style reverse geocoding over HTTP. The client carries its own
/// request timeout so a hanging lookup degrades instead of blocking.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    client: reqwest::Client,
    base_url: String,
}

impl NominatimClient {
    pub fn new(
        base_url: impl Into<String>,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<Self, GeocodeError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, GeocodeError> {
        Self::new(
            &config.geocode_base_url,
            &config.geocode_user_agent,
            config.geocode_timeout(),
        )
    }
}

impl ReverseGeocoder for NominatimClient {
    async fn display_name(&self, latitude: f64, longitude: f64) -> Result<String, GeocodeError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("format", "json")])
            .query(&[("lat", latitude), ("lon", longitude)])
            .query(&[("zoom", "18"), ("addressdetails", "1")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GeocodeError::Status(response.status().as_u16()));
        }

        let body: ReverseResponse = response.json().await?;
        body.display_name.ok_or(GeocodeError::MissingDisplayName)
    }
}

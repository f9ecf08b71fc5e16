pub mod geocode;
pub mod sensor;

use std::time::Duration;

use tracing::{debug, warn};

use crate::error::GeolocationError;
use crate::model::{GeolocationRequestOptions, LocationFix};
use geocode::ReverseGeocoder;
use sensor::{PositionSensor, SensorError};

pub use geocode::NominatimClient;
pub use sensor::{FixedPositionSensor, UnsupportedSensor};

/// Obtains the device's current position under a bounded time budget,
/// optionally enriched with a reverse-geocoded address.
pub struct PositionService<S, G> {
    sensor: S,
    geocoder: G,
}

impl<S, G> PositionService<S, G>
where
    S: PositionSensor,
    G: ReverseGeocoder,
{
    pub fn new(sensor: S, geocoder: G) -> Self {
        Self { sensor, geocoder }
    }

    /// Suspends until the sensor reports a position or `timeout_ms` elapses.
    /// No internal retries; retry policy is the caller's.
    pub async fn acquire_fix(
        &self,
        options: &GeolocationRequestOptions,
    ) -> Result<LocationFix, GeolocationError> {
        let budget = Duration::from_millis(options.timeout_ms);

        let raw = match tokio::time::timeout(budget, self.sensor.current_position(options)).await {
            Ok(Ok(raw)) => raw,
            Ok(Err(e)) => return Err(map_sensor_error(e)),
            Err(_) => return Err(GeolocationError::Timeout),
        };

        debug!(
            latitude = raw.latitude,
            longitude = raw.longitude,
            accuracy_m = raw.accuracy_meters,
            "Acquired position fix"
        );

        Ok(LocationFix {
            latitude: raw.latitude,
            longitude: raw.longitude,
            accuracy_meters: raw.accuracy_meters,
            address: None,
        })
    }

    /// `acquire_fix`, then a best-effort address lookup. A geocoding failure
    /// is swallowed: the fix still comes back, just without an address. The
    /// coordinates are the contract, the address is a convenience.
    pub async fn acquire_fix_with_address(
        &self,
        options: &GeolocationRequestOptions,
    ) -> Result<LocationFix, GeolocationError> {
        let mut fix = self.acquire_fix(options).await?;

        match self
            .geocoder
            .display_name(fix.latitude, fix.longitude)
            .await
        {
            Ok(address) => fix.address = Some(address),
            Err(e) => {
                warn!(
                    error = %e,
                    latitude = fix.latitude,
                    longitude = fix.longitude,
                    "Reverse geocoding failed; returning fix without address"
                );
            }
        }

        Ok(fix)
    }
}

fn map_sensor_error(e: SensorError) -> GeolocationError {
    match e {
        SensorError::PermissionDenied => GeolocationError::PermissionDenied,
        SensorError::PositionUnavailable => GeolocationError::PositionUnavailable,
        SensorError::Timeout => GeolocationError::Timeout,
        SensorError::Unsupported => GeolocationError::UnsupportedPlatform,
        SensorError::Unknown(detail) => {
            warn!(detail = %detail, "Sensor reported an unknown error");
            GeolocationError::PositionUnavailable
        }
    }
}

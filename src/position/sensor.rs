use thiserror::Error;

use crate::model::GeolocationRequestOptions;

/// What the device-side sensor reports before enrichment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawPosition {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy_meters: Option<f64>,
}

/// The closed error-code set of the underlying "get current position" call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SensorError {
    #[error("permission denied")]
    PermissionDenied,

    #[error("position unavailable")]
    PositionUnavailable,

    #[error("sensor timed out")]
    Timeout,

    #[error("no location capability")]
    Unsupported,

    #[error("{0}")]
    Unknown(String),
}

/// Single-shot position source. Exactly one fix or one failure per call;
/// retry policy belongs to the caller.
#[allow(async_fn_in_trait)]
pub trait PositionSensor {
    async fn current_position(
        &self,
        options: &GeolocationRequestOptions,
    ) -> Result<RawPosition, SensorError>;
}

/// A sensor pinned to configured coordinates, for fixed-terminal (kiosk)
/// deployments where the device does not move.
#[derive(Debug, Clone)]
pub struct FixedPositionSensor {
    latitude: f64,
    longitude: f64,
    accuracy_meters: Option<f64>,
}

impl FixedPositionSensor {
    pub fn new(latitude: f64, longitude: f64, accuracy_meters: Option<f64>) -> Self {
        Self {
            latitude,
            longitude,
            accuracy_meters,
        }
    }
}

impl PositionSensor for FixedPositionSensor {
    async fn current_position(
        &self,
        _options: &GeolocationRequestOptions,
    ) -> Result<RawPosition, SensorError> {
        Ok(RawPosition {
            latitude: self.latitude,
            longitude: self.longitude,
            accuracy_meters: self.accuracy_meters,
        })
    }
}

/// Stand-in for platforms with no location capability at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedSensor;

impl PositionSensor for UnsupportedSensor {
    async fn current_position(
        &self,
        _options: &GeolocationRequestOptions,
    ) -> Result<RawPosition, SensorError> {
        Err(SensorError::Unsupported)
    }
}

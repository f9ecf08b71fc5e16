use serde::{Deserialize, Serialize};

/// A verified device position. Immutable once constructed and passed by
/// value; the coordinates are the contract, `address` is a best-effort
/// convenience field filled in by reverse geocoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationFix {
    /// Degrees, [-90, 90].
    pub latitude: f64,
    /// Degrees, [-180, 180].
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy_meters: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl LocationFix {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy_meters: None,
            address: None,
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn coordinates(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}

/// Options for a single-shot position request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeolocationRequestOptions {
    pub high_accuracy: bool,
    /// Overall budget for the fix; must be > 0.
    pub timeout_ms: u64,
    /// How stale a cached sensor reading may be. 0 forces a fresh reading.
    pub max_cache_age_ms: u64,
}

impl Default for GeolocationRequestOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout_ms: 10_000,
            max_cache_age_ms: 0,
        }
    }
}

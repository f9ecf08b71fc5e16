use std::env;
use std::time::Duration;

use dotenvy::dotenv;

use crate::model::GeolocationRequestOptions;

#[derive(Debug, Clone)]
pub struct Config {
    pub geocode_base_url: String,
    pub geocode_user_agent: String,
    pub geocode_timeout_ms: u64,

    pub fix_timeout_ms: u64,
    pub fix_high_accuracy: bool,
    pub fix_max_cache_age_ms: u64,

    // Fixed-terminal sensor coordinates (kiosk deployments).
    pub sensor_latitude: f64,
    pub sensor_longitude: f64,
    pub sensor_accuracy_m: Option<f64>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            geocode_base_url: env::var("GEOCODE_BASE_URL")
                .unwrap_or_else(|_| "https://nominatim.openstreetmap.org/reverse".to_string()),
            geocode_user_agent: env::var("GEOCODE_USER_AGENT")
                .unwrap_or_else(|_| "geoattend/0.1.0".to_string()),
            geocode_timeout_ms: env::var("GEOCODE_TIMEOUT_MS")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .unwrap(),

            fix_timeout_ms: env::var("FIX_TIMEOUT_MS")
                .unwrap_or_else(|_| "10000".to_string()) // default 10s
                .parse()
                .unwrap(),
            fix_high_accuracy: env::var("FIX_HIGH_ACCURACY")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .unwrap(),
            fix_max_cache_age_ms: env::var("FIX_MAX_CACHE_AGE_MS")
                .unwrap_or_else(|_| "0".to_string())
                .parse()
                .unwrap(),

            sensor_latitude: env::var("SENSOR_LAT")
                .unwrap_or_else(|_| "0.0".to_string())
                .parse()
                .unwrap(),
            sensor_longitude: env::var("SENSOR_LON")
                .unwrap_or_else(|_| "0.0".to_string())
                .parse()
                .unwrap(),
            sensor_accuracy_m: env::var("SENSOR_ACCURACY_M")
                .ok()
                .map(|v| v.parse().unwrap()),
        }
    }

    pub fn geolocation_options(&self) -> GeolocationRequestOptions {
        GeolocationRequestOptions {
            high_accuracy: self.fix_high_accuracy,
            timeout_ms: self.fix_timeout_ms,
            max_cache_age_ms: self.fix_max_cache_age_ms,
        }
    }

    pub fn geocode_timeout(&self) -> Duration {
        Duration::from_millis(self.geocode_timeout_ms)
    }
}

//! Great-circle math over a spherical Earth model.
//!
//! Pure and stateless. Inputs are assumed to be valid decimal degrees;
//! validation happens upstream where the coordinates are produced.

pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine distance between two coordinates, in meters.
pub fn distance_meters(lat_a: f64, lon_a: f64, lat_b: f64, lon_b: f64) -> f64 {
    let phi_a = lat_a.to_radians();
    let phi_b = lat_b.to_radians();
    let d_phi = (lat_b - lat_a).to_radians();
    let d_lambda = (lon_b - lon_a).to_radians();

    let a = (d_phi / 2.0).sin().powi(2)
        + phi_a.cos() * phi_b.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// Whether the current position lies within `radius_meters` of the target.
/// A point exactly on the boundary counts as inside.
pub fn is_within_radius(
    current_lat: f64,
    current_lon: f64,
    target_lat: f64,
    target_lon: f64,
    radius_meters: f64,
) -> bool {
    distance_meters(current_lat, current_lon, target_lat, target_lon) <= radius_meters
}

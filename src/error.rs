use thiserror::Error;

/// Fatal outcomes of a position-fix acquisition. Surfaced to the caller
/// as-is; the service never retries internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("Location permission denied")]
    PermissionDenied,

    #[error("Device position unavailable")]
    PositionUnavailable,

    #[error("Timed out waiting for a position fix")]
    Timeout,

    #[error("No location capability on this platform")]
    UnsupportedPlatform,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    #[error("Unsupported report format: {0}")]
    UnsupportedFormat(String),
}

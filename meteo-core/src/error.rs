use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single round trip to the Open-Meteo endpoints.
///
/// "No geocoding match" is deliberately *not* a variant: the geocoding
/// service reporting zero results is a normal outcome and surfaces as
/// `Ok(None)` from [`crate::client::OpenMeteoClient::resolve_location`].
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{endpoint} request failed with status {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: StatusCode,
        body: String,
    },

    /// The response body did not match the expected schema: a missing
    /// field, an unparsable timestamp, or misaligned parallel arrays.
    #[error("malformed {endpoint} payload: {detail}")]
    Payload {
        endpoint: &'static str,
        detail: String,
    },
}

/// Failure of the host geolocation capability.
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("location permission denied")]
    PermissionDenied,

    #[error("location service unavailable")]
    ServiceUnavailable,

    #[error("location request timed out")]
    Timeout,

    #[error("location error: {0}")]
    Other(String),
}

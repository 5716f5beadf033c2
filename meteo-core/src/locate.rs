//! Host geolocation seam.
//!
//! The widget treats "where is this device" as a host capability; here it is
//! a trait so the CLI, tests and any future embedding can plug in whatever
//! the platform offers.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::LocationError;

/// A resolved device position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoFix {
    pub latitude: f64,
    pub longitude: f64,
}

/// Options for a single geolocation request.
#[derive(Debug, Clone, Copy)]
pub struct LocateRequest {
    pub high_accuracy: bool,
    /// Bounded wait for a fix.
    pub timeout: Duration,
    /// A cached fix no older than this may be returned.
    pub max_age: Duration,
}

impl Default for LocateRequest {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: Duration::from_secs(10),
            max_age: Duration::from_secs(300),
        }
    }
}

#[async_trait]
pub trait GeoLocator: Send + Sync {
    async fn locate(&self, request: LocateRequest) -> Result<GeoFix, LocationError>;
}

/// Reads a `lat, lon` pair from an environment variable.
///
/// The portable stand-in for a platform location service: shells and
/// scripts export the variable, everything else sees the capability as
/// unavailable.
#[derive(Debug, Clone)]
pub struct EnvLocator {
    var: String,
}

impl EnvLocator {
    pub const DEFAULT_VAR: &'static str = "METEO_LOCATION";

    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvLocator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_VAR)
    }
}

#[async_trait]
impl GeoLocator for EnvLocator {
    async fn locate(&self, _request: LocateRequest) -> Result<GeoFix, LocationError> {
        let raw = std::env::var(&self.var).map_err(|_| LocationError::ServiceUnavailable)?;

        let (lat, lon) = raw
            .split_once(',')
            .ok_or_else(|| LocationError::Other(format!("malformed {}: '{raw}'", self.var)))?;

        let latitude: f64 = lat
            .trim()
            .parse()
            .map_err(|_| LocationError::Other(format!("malformed {}: '{raw}'", self.var)))?;
        let longitude: f64 = lon
            .trim()
            .parse()
            .map_err(|_| LocationError::Other(format!("malformed {}: '{raw}'", self.var)))?;

        Ok(GeoFix {
            latitude,
            longitude,
        })
    }
}

/// Always reports a fixed position. Test double.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocator(pub GeoFix);

#[async_trait]
impl GeoLocator for FixedLocator {
    async fn locate(&self, _request: LocateRequest) -> Result<GeoFix, LocationError> {
        Ok(self.0)
    }
}

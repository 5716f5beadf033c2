//! Core library for the `meteo` CLI.
//!
//! This crate defines:
//! - The Open-Meteo fetch layer (geocoding, current conditions, forecast)
//! - Shared domain models and the WMO weather-code tables
//! - The geolocation seam for "use my location"
//! - The presentation controller driving the three display regions
//!
//! It is used by `meteo-cli`, but can also be reused by other binaries or
//! services.

pub mod app;
pub mod client;
pub mod condition;
pub mod error;
pub mod locate;
pub mod model;

pub use app::{DailyEntry, RegionState, Regions, WeatherApp, WeatherView};
pub use client::OpenMeteoClient;
pub use condition::WeatherCode;
pub use error::{FetchError, LocationError};
pub use locate::{EnvLocator, FixedLocator, GeoFix, GeoLocator, LocateRequest};
pub use model::{CurrentReading, DailyPoint, Forecast, HourlyPoint, Location};

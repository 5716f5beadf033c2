use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::condition::WeatherCode;

/// The single piece of session state: where the widget is currently looking.
///
/// Replaced wholesale on every successful load, never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub display_name: String,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64, display_name: impl Into<String>) -> Self {
        Self {
            latitude,
            longitude,
            display_name: display_name.into(),
        }
    }
}

/// Instantaneous conditions, one snapshot per load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentReading {
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: f64,
    pub precipitation_mm: f64,
    pub rain_mm: f64,
    pub cloud_cover_pct: f64,
    pub pressure_msl_hpa: f64,
    pub surface_pressure_hpa: f64,
    pub wind_speed_kmh: f64,
    pub wind_direction_deg: f64,
    pub wind_gusts_kmh: f64,
    pub code: WeatherCode,
    pub is_day: bool,
}

/// One hourly forecast entry. Timestamps are local to the queried location
/// (`timezone=auto`), without an offset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourlyPoint {
    pub time: NaiveDateTime,
    pub temperature_c: f64,
    pub code: WeatherCode,
    pub precipitation_probability_pct: u8,
    pub is_day: bool,
}

/// One calendar-day forecast entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub code: WeatherCode,
    pub temperature_max_c: f64,
    pub temperature_min_c: f64,
    pub precipitation_probability_max_pct: u8,
    pub wind_speed_max_kmh: f64,
    pub sunrise: NaiveDateTime,
    pub sunset: NaiveDateTime,
}

/// Hourly and daily series from a single forecast round trip.
///
/// The wire format is parallel arrays; the fetch boundary zips them into
/// per-entry structs after checking the arrays are index-aligned, so this
/// type cannot represent a misaligned series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Forecast {
    pub hourly: Vec<HourlyPoint>,
    pub daily: Vec<DailyPoint>,
}

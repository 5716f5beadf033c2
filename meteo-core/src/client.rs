//! Open-Meteo HTTP client: geocoding search, current conditions and the
//! combined hourly/daily forecast.
//!
//! Each operation is a single round trip; there is no retrying, caching or
//! rate limiting. The requested field lists are fixed and part of the
//! contract with the renderer.

use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};
use reqwest::Client;
use serde::Deserialize;

use crate::condition::WeatherCode;
use crate::error::FetchError;
use crate::model::{CurrentReading, DailyPoint, Forecast, HourlyPoint, Location};

pub const API_BASE: &str = "https://api.open-meteo.com/v1";
pub const GEOCODING_BASE: &str = "https://geocoding-api.open-meteo.com/v1";

/// Locale for geocoding results and the rest of the UI strings.
const GEOCODING_LANGUAGE: &str = "es";

const REQUEST_TIMEOUT_SECS: u64 = 10;

const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,apparent_temperature,is_day,\
     precipitation,rain,weather_code,cloud_cover,pressure_msl,surface_pressure,\
     wind_speed_10m,wind_direction_10m,wind_gusts_10m";

const HOURLY_FIELDS: &str = "temperature_2m,relative_humidity_2m,apparent_temperature,\
     precipitation_probability,precipitation,rain,weather_code,cloud_cover,visibility,\
     wind_speed_10m,wind_direction_10m,wind_gusts_10m,is_day";

const DAILY_FIELDS: &str = "weather_code,temperature_2m_max,temperature_2m_min,\
     apparent_temperature_max,apparent_temperature_min,sunrise,sunset,daylight_duration,\
     precipitation_sum,rain_sum,precipitation_hours,precipitation_probability_max,\
     wind_speed_10m_max,wind_gusts_10m_max,wind_direction_10m_dominant";

/// Timestamps arrive as local ISO 8601 without seconds or offset,
/// e.g. `2025-08-30T14:00`.
const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    http: Client,
    api_base: String,
    geocoding_base: String,
}

impl Default for OpenMeteoClient {
    fn default() -> Self {
        Self::new()
    }
}

impl OpenMeteoClient {
    pub fn new() -> Self {
        Self::with_base_urls(API_BASE, GEOCODING_BASE)
    }

    /// Point the client at alternative endpoints. Used by tests to target a
    /// mock server; production code uses the fixed constants.
    pub fn with_base_urls(api_base: impl Into<String>, geocoding_base: impl Into<String>) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            http,
            api_base: api_base.into(),
            geocoding_base: geocoding_base.into(),
        }
    }

    /// Geocode a free-text query, returning the single best match.
    ///
    /// Zero results is `Ok(None)` — a normal outcome, distinct from a
    /// transport failure.
    pub async fn resolve_location(&self, query: &str) -> Result<Option<Location>, FetchError> {
        let url = format!("{}/search", self.geocoding_base);
        tracing::debug!(query, "geocoding search");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("name", query),
                ("count", "1"),
                ("language", GEOCODING_LANGUAGE),
                ("format", "json"),
            ])
            .send()
            .await?;

        let body = read_success_body(res, "geocoding").await?;
        let parsed: GeoResponse = parse_payload(&body, "geocoding")?;

        let Some(first) = parsed.results.unwrap_or_default().into_iter().next() else {
            return Ok(None);
        };

        let display_name = first.display_name();
        Ok(Some(Location::new(
            first.latitude,
            first.longitude,
            display_name,
        )))
    }

    /// Fetch the fixed set of instantaneous fields for a coordinate pair.
    pub async fn fetch_current(&self, lat: f64, lon: f64) -> Result<CurrentReading, FetchError> {
        let url = format!("{}/forecast", self.api_base);
        tracing::debug!(lat, lon, "fetching current conditions");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("latitude", lat.to_string().as_str()),
                ("longitude", lon.to_string().as_str()),
                ("current", CURRENT_FIELDS),
                ("timezone", "auto"),
            ])
            .send()
            .await?;

        let body = read_success_body(res, "current weather").await?;
        let parsed: CurrentEnvelope = parse_payload(&body, "current weather")?;

        Ok(parsed.current.into_reading())
    }

    /// Fetch the hourly (24 h) and daily (7 day) series in one call.
    pub async fn fetch_forecast(&self, lat: f64, lon: f64) -> Result<Forecast, FetchError> {
        let url = format!("{}/forecast", self.api_base);
        tracing::debug!(lat, lon, "fetching forecast");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("latitude", lat.to_string().as_str()),
                ("longitude", lon.to_string().as_str()),
                ("hourly", HOURLY_FIELDS),
                ("daily", DAILY_FIELDS),
                ("forecast_hours", "24"),
                ("forecast_days", "7"),
                ("timezone", "auto"),
            ])
            .send()
            .await?;

        let body = read_success_body(res, "forecast").await?;
        let parsed: ForecastEnvelope = parse_payload(&body, "forecast")?;

        parsed.into_forecast()
    }
}

/// Check the transport-level status and hand back the body text.
async fn read_success_body(
    res: reqwest::Response,
    endpoint: &'static str,
) -> Result<String, FetchError> {
    let status = res.status();
    let body = res.text().await?;

    if !status.is_success() {
        tracing::warn!(%status, endpoint, "request failed");
        return Err(FetchError::Status {
            endpoint,
            status,
            body: truncate_body(&body),
        });
    }

    Ok(body)
}

fn parse_payload<'a, T: Deserialize<'a>>(
    body: &'a str,
    endpoint: &'static str,
) -> Result<T, FetchError> {
    serde_json::from_str(body).map_err(|e| FetchError::Payload {
        endpoint,
        detail: e.to_string(),
    })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        // Cut on a char boundary; error bodies can carry multibyte text.
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}

// --- Open-Meteo JSON response types ---

#[derive(Debug, Deserialize)]
struct GeoResponse {
    results: Option<Vec<GeoResult>>,
}

#[derive(Debug, Deserialize)]
struct GeoResult {
    name: String,
    admin1: Option<String>,
    country: Option<String>,
    latitude: f64,
    longitude: f64,
}

impl GeoResult {
    /// `name[, admin1][, country]`, skipping absent parts.
    fn display_name(&self) -> String {
        let mut name = self.name.clone();
        for part in [&self.admin1, &self.country].into_iter().flatten() {
            name.push_str(", ");
            name.push_str(part);
        }
        name
    }
}

#[derive(Debug, Deserialize)]
struct CurrentEnvelope {
    current: RawCurrent,
}

#[derive(Debug, Deserialize)]
struct RawCurrent {
    temperature_2m: f64,
    relative_humidity_2m: f64,
    apparent_temperature: f64,
    is_day: u8,
    precipitation: f64,
    rain: f64,
    weather_code: u16,
    cloud_cover: f64,
    pressure_msl: f64,
    surface_pressure: f64,
    wind_speed_10m: f64,
    wind_direction_10m: f64,
    wind_gusts_10m: f64,
}

impl RawCurrent {
    fn into_reading(self) -> CurrentReading {
        CurrentReading {
            temperature_c: self.temperature_2m,
            feels_like_c: self.apparent_temperature,
            humidity_pct: self.relative_humidity_2m,
            precipitation_mm: self.precipitation,
            rain_mm: self.rain,
            cloud_cover_pct: self.cloud_cover,
            pressure_msl_hpa: self.pressure_msl,
            surface_pressure_hpa: self.surface_pressure,
            wind_speed_kmh: self.wind_speed_10m,
            wind_direction_deg: self.wind_direction_10m,
            wind_gusts_kmh: self.wind_gusts_10m,
            code: WeatherCode::from_wmo(self.weather_code),
            is_day: self.is_day != 0,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ForecastEnvelope {
    hourly: RawHourly,
    daily: RawDaily,
}

#[derive(Debug, Deserialize)]
struct RawHourly {
    time: Vec<String>,
    temperature_2m: Vec<f64>,
    // May be null in the tail of the window.
    precipitation_probability: Vec<Option<u8>>,
    weather_code: Vec<u16>,
    is_day: Vec<u8>,
}

#[derive(Debug, Deserialize)]
struct RawDaily {
    time: Vec<String>,
    weather_code: Vec<u16>,
    temperature_2m_max: Vec<f64>,
    temperature_2m_min: Vec<f64>,
    precipitation_probability_max: Vec<Option<u8>>,
    wind_speed_10m_max: Vec<f64>,
    sunrise: Vec<String>,
    sunset: Vec<String>,
}

impl ForecastEnvelope {
    /// Zip the parallel arrays into per-entry structs, enforcing the
    /// index-alignment invariant. A length mismatch means the payload does
    /// not match the contract and is reported as a fetch failure.
    fn into_forecast(self) -> Result<Forecast, FetchError> {
        let h = &self.hourly;
        let n = h.time.len();
        ensure_aligned("forecast", "hourly.temperature_2m", n, h.temperature_2m.len())?;
        ensure_aligned(
            "forecast",
            "hourly.precipitation_probability",
            n,
            h.precipitation_probability.len(),
        )?;
        ensure_aligned("forecast", "hourly.weather_code", n, h.weather_code.len())?;
        ensure_aligned("forecast", "hourly.is_day", n, h.is_day.len())?;

        let mut hourly = Vec::with_capacity(n);
        for i in 0..n {
            hourly.push(HourlyPoint {
                time: parse_local_time("forecast", &h.time[i])?,
                temperature_c: h.temperature_2m[i],
                code: WeatherCode::from_wmo(h.weather_code[i]),
                precipitation_probability_pct: h.precipitation_probability[i].unwrap_or(0),
                is_day: h.is_day[i] != 0,
            });
        }

        let d = &self.daily;
        let n = d.time.len();
        ensure_aligned("forecast", "daily.weather_code", n, d.weather_code.len())?;
        ensure_aligned(
            "forecast",
            "daily.temperature_2m_max",
            n,
            d.temperature_2m_max.len(),
        )?;
        ensure_aligned(
            "forecast",
            "daily.temperature_2m_min",
            n,
            d.temperature_2m_min.len(),
        )?;
        ensure_aligned(
            "forecast",
            "daily.precipitation_probability_max",
            n,
            d.precipitation_probability_max.len(),
        )?;
        ensure_aligned(
            "forecast",
            "daily.wind_speed_10m_max",
            n,
            d.wind_speed_10m_max.len(),
        )?;
        ensure_aligned("forecast", "daily.sunrise", n, d.sunrise.len())?;
        ensure_aligned("forecast", "daily.sunset", n, d.sunset.len())?;

        let mut daily = Vec::with_capacity(n);
        for i in 0..n {
            daily.push(DailyPoint {
                date: parse_local_date("forecast", &d.time[i])?,
                code: WeatherCode::from_wmo(d.weather_code[i]),
                temperature_max_c: d.temperature_2m_max[i],
                temperature_min_c: d.temperature_2m_min[i],
                precipitation_probability_max_pct: d.precipitation_probability_max[i].unwrap_or(0),
                wind_speed_max_kmh: d.wind_speed_10m_max[i],
                sunrise: parse_local_time("forecast", &d.sunrise[i])?,
                sunset: parse_local_time("forecast", &d.sunset[i])?,
            });
        }

        Ok(Forecast { hourly, daily })
    }
}

fn ensure_aligned(
    endpoint: &'static str,
    field: &str,
    expected: usize,
    actual: usize,
) -> Result<(), FetchError> {
    if expected == actual {
        Ok(())
    } else {
        Err(FetchError::Payload {
            endpoint,
            detail: format!("{field} has {actual} entries, expected {expected}"),
        })
    }
}

fn parse_local_time(endpoint: &'static str, raw: &str) -> Result<NaiveDateTime, FetchError> {
    NaiveDateTime::parse_from_str(raw, TIME_FORMAT).map_err(|_| FetchError::Payload {
        endpoint,
        detail: format!("invalid timestamp '{raw}'"),
    })
}

fn parse_local_date(endpoint: &'static str, raw: &str) -> Result<NaiveDate, FetchError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| FetchError::Payload {
        endpoint,
        detail: format!("invalid date '{raw}'"),
    })
}

//! Presentation controller: wires user actions to data loads and renders
//! the three display regions (current conditions, hourly strip, daily
//! strip) from one consistent pair of responses.

use chrono::{Datelike, Local, NaiveDateTime};

use crate::client::OpenMeteoClient;
use crate::error::LocationError;
use crate::locate::{GeoLocator, LocateRequest};
use crate::model::{CurrentReading, DailyPoint, Forecast, HourlyPoint, Location};

/// Loaded on startup when the user has not asked for anything yet.
pub const DEFAULT_LOCATION: (f64, f64, &str) = (40.4168, -3.7038, "Madrid, España");

/// Display label for a device-location load; the fix is not reverse-geocoded.
pub const DEVICE_LOCATION_LABEL: &str = "Tu ubicación";

/// Hourly entries shown: the forward-looking display window.
pub const HOURLY_DISPLAY_WINDOW: usize = 12;

/// Daily entries shown.
pub const DAILY_DISPLAY_DAYS: usize = 7;

pub const MSG_NOT_FOUND: &str =
    "No se encontró la ubicación. Intenta con otra ciudad o usa coordenadas.";
pub const MSG_SEARCH_FAILED: &str = "Error al buscar la ubicación. Inténtalo de nuevo.";
pub const MSG_LOAD_FAILED: &str =
    "Error al cargar los datos meteorológicos. Inténtalo de nuevo.";
pub const MSG_GEOLOCATION_UNAVAILABLE: &str =
    "Geolocalización no disponible en este dispositivo.";
pub const MSG_GEOLOCATION_FAILED: &str =
    "No se pudo obtener tu ubicación. Verifica los permisos.";

const WEEKDAYS: [&str; 7] = [
    "Domingo",
    "Lunes",
    "Martes",
    "Miércoles",
    "Jueves",
    "Viernes",
    "Sábado",
];

/// Observable state of one display region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionState {
    /// Nothing loaded yet.
    Idle,
    Loading,
    Populated,
    Error(String),
}

/// The three regions always transition together: Loading before a load
/// starts, Populated on joint success, Error on any failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Regions {
    pub current: RegionState,
    pub hourly: RegionState,
    pub daily: RegionState,
}

impl Regions {
    fn new() -> Self {
        Self {
            current: RegionState::Idle,
            hourly: RegionState::Idle,
            daily: RegionState::Idle,
        }
    }

    fn set_all(&mut self, state: RegionState) {
        self.current = state.clone();
        self.hourly = state.clone();
        self.daily = state;
    }
}

/// A daily strip row: the day label plus its forecast entry.
#[derive(Debug, Clone)]
pub struct DailyEntry {
    pub label: &'static str,
    pub day: DailyPoint,
}

/// Render target for the three regions plus the geolocation control.
pub trait WeatherView {
    /// All three regions enter the loading state.
    fn show_loading(&mut self);
    /// All three regions show the same localized error message.
    fn show_error(&mut self, message: &str);
    fn show_current(&mut self, location: &str, reading: &CurrentReading);
    fn show_hourly(&mut self, entries: &[HourlyPoint]);
    fn show_daily(&mut self, entries: &[DailyEntry]);
    /// The "use my location" control is busy (disabled) or idle again.
    fn set_locating(&mut self, busy: bool);
}

pub struct WeatherApp<V: WeatherView> {
    client: OpenMeteoClient,
    locator: Box<dyn GeoLocator>,
    view: V,
    location: Option<Location>,
    regions: Regions,
    locating: bool,
}

impl<V: WeatherView> WeatherApp<V> {
    pub fn new(client: OpenMeteoClient, locator: Box<dyn GeoLocator>, view: V) -> Self {
        Self {
            client,
            locator,
            view,
            location: None,
            regions: Regions::new(),
            locating: false,
        }
    }

    /// The location shown by the last successful load, if any.
    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    pub fn regions(&self) -> &Regions {
        &self.regions
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Load the startup default (the widget's page-load behavior).
    pub async fn load_default(&mut self) {
        let (lat, lon, name) = DEFAULT_LOCATION;
        self.load_weather(Location::new(lat, lon, name)).await;
    }

    /// Handle a submitted search query.
    ///
    /// Empty input is a no-op. A strict `<float>, <float>` pair is used as
    /// literal coordinates, skipping geocoding; anything else is geocoded.
    /// A failed search never alters the previously displayed location.
    pub async fn handle_search(&mut self, raw: &str) {
        let query = raw.trim();
        if query.is_empty() {
            return;
        }

        if let Some((lat, lon)) = parse_coordinates(query) {
            let display_name = format!("{lat:.4}, {lon:.4}");
            self.load_weather(Location::new(lat, lon, display_name)).await;
            return;
        }

        match self.client.resolve_location(query).await {
            Ok(Some(location)) => self.load_weather(location).await,
            Ok(None) => self.fail(MSG_NOT_FOUND),
            Err(e) => {
                tracing::error!(error = %e, query, "geocoding search failed");
                self.fail(MSG_SEARCH_FAILED);
            }
        }
    }

    /// Load weather for the device's position.
    ///
    /// The triggering control is marked busy for the duration of the
    /// request, on both success and failure paths; a request arriving while
    /// one is pending is ignored.
    pub async fn use_device_location(&mut self) {
        if self.locating {
            return;
        }
        self.locating = true;
        self.view.set_locating(true);

        match self.locator.locate(LocateRequest::default()).await {
            Ok(fix) => {
                self.load_weather(Location::new(
                    fix.latitude,
                    fix.longitude,
                    DEVICE_LOCATION_LABEL,
                ))
                .await;
            }
            Err(e) => {
                tracing::error!(error = %e, "geolocation failed");
                let message = match e {
                    LocationError::ServiceUnavailable => MSG_GEOLOCATION_UNAVAILABLE,
                    _ => MSG_GEOLOCATION_FAILED,
                };
                self.fail(message);
            }
        }

        self.locating = false;
        self.view.set_locating(false);
    }

    /// One full load: Loading on all regions, the two fetches joined, then
    /// either all regions rendered from the same response pair or all
    /// regions in Error. Never a partial render.
    pub async fn load_weather(&mut self, location: Location) {
        self.regions.set_all(RegionState::Loading);
        self.view.show_loading();

        let (lat, lon) = (location.latitude, location.longitude);
        let (current, forecast) = tokio::join!(
            self.client.fetch_current(lat, lon),
            self.client.fetch_forecast(lat, lon),
        );

        let (current, forecast) = match (current, forecast) {
            (Ok(c), Ok(f)) => (c, f),
            (current, forecast) => {
                if let Err(e) = &current {
                    tracing::error!(error = %e, "current weather fetch failed");
                }
                if let Err(e) = &forecast {
                    tracing::error!(error = %e, "forecast fetch failed");
                }
                self.fail(MSG_LOAD_FAILED);
                return;
            }
        };

        self.render(&location, &current, &forecast);
        self.location = Some(location);
        self.regions.set_all(RegionState::Populated);
    }

    fn render(&mut self, location: &Location, current: &CurrentReading, forecast: &Forecast) {
        self.view.show_current(&location.display_name, current);

        let now = Local::now().naive_local();
        self.view.show_hourly(&hourly_window(&forecast.hourly, now));
        self.view.show_daily(&daily_entries(&forecast.daily));
    }

    fn fail(&mut self, message: &str) {
        self.regions.set_all(RegionState::Error(message.to_string()));
        self.view.show_error(message);
    }
}

/// Trim the hourly series to the display window: entries at or after `now`,
/// at most [`HOURLY_DISPLAY_WINDOW`], source (chronological) order preserved.
pub fn hourly_window(series: &[HourlyPoint], now: NaiveDateTime) -> Vec<HourlyPoint> {
    series
        .iter()
        .filter(|point| point.time >= now)
        .take(HOURLY_DISPLAY_WINDOW)
        .cloned()
        .collect()
}

/// Label the first [`DAILY_DISPLAY_DAYS`] daily entries: index 0 is "Hoy",
/// every other index the weekday name of its date. No time filtering.
pub fn daily_entries(days: &[DailyPoint]) -> Vec<DailyEntry> {
    days.iter()
        .take(DAILY_DISPLAY_DAYS)
        .enumerate()
        .map(|(index, day)| DailyEntry {
            label: if index == 0 {
                "Hoy"
            } else {
                WEEKDAYS[day.date.weekday().num_days_from_sunday() as usize]
            },
            day: day.clone(),
        })
        .collect()
}

/// Parse a strict `<float>, <float>` pair: optional sign, digits, at most
/// one decimal point, no exponents; whitespace allowed only after the comma.
pub fn parse_coordinates(query: &str) -> Option<(f64, f64)> {
    let (lat_raw, lon_raw) = query.split_once(',')?;
    let lat = parse_plain_float(lat_raw)?;
    let lon = parse_plain_float(lon_raw.trim_start())?;
    Some((lat, lon))
}

fn parse_plain_float(s: &str) -> Option<f64> {
    let digits = s.strip_prefix('-').unwrap_or(s);
    // At least one leading digit, then digits with at most one dot.
    if !digits.chars().next()?.is_ascii_digit() {
        return None;
    }
    let mut dots = 0;
    for c in digits.chars() {
        match c {
            '.' => dots += 1,
            c if c.is_ascii_digit() => {}
            _ => return None,
        }
    }
    if dots > 1 {
        return None;
    }
    s.parse().ok()
}

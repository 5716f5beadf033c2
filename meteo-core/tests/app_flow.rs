//! End-to-end controller tests against a mock Open-Meteo server.
//!
//! Covers the region state machine: every load either populates all three
//! regions from one response pair or puts all three into the same error.

use async_trait::async_trait;
use chrono::{Duration, Local};
use serde_json::json;
use wiremock::matchers::{method, path, query_param, query_param_contains};
use wiremock::{Mock, MockServer, ResponseTemplate};

use meteo_core::app::{
    MSG_GEOLOCATION_FAILED, MSG_GEOLOCATION_UNAVAILABLE, MSG_LOAD_FAILED, MSG_NOT_FOUND,
};
use meteo_core::{
    CurrentReading, DailyEntry, FixedLocator, GeoFix, GeoLocator, HourlyPoint, LocateRequest,
    LocationError, OpenMeteoClient, RegionState, WeatherApp, WeatherView,
};

/// Captures everything the controller pushes at the view.
#[derive(Default)]
struct RecordingView {
    loading_shown: usize,
    errors: Vec<String>,
    current: Option<(String, CurrentReading)>,
    hourly: Option<Vec<HourlyPoint>>,
    daily_labels: Option<Vec<&'static str>>,
    locating_calls: Vec<bool>,
}

impl WeatherView for RecordingView {
    fn show_loading(&mut self) {
        self.loading_shown += 1;
    }

    fn show_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }

    fn show_current(&mut self, location: &str, reading: &CurrentReading) {
        self.current = Some((location.to_string(), reading.clone()));
    }

    fn show_hourly(&mut self, entries: &[HourlyPoint]) {
        self.hourly = Some(entries.to_vec());
    }

    fn show_daily(&mut self, entries: &[DailyEntry]) {
        self.daily_labels = Some(entries.iter().map(|e| e.label).collect());
    }

    fn set_locating(&mut self, busy: bool) {
        self.locating_calls.push(busy);
    }
}

struct DeniedLocator;

#[async_trait]
impl GeoLocator for DeniedLocator {
    async fn locate(&self, _request: LocateRequest) -> Result<GeoFix, LocationError> {
        Err(LocationError::PermissionDenied)
    }
}

struct NoLocator;

#[async_trait]
impl GeoLocator for NoLocator {
    async fn locate(&self, _request: LocateRequest) -> Result<GeoFix, LocationError> {
        Err(LocationError::ServiceUnavailable)
    }
}

fn current_body() -> serde_json::Value {
    json!({
        "current": {
            "temperature_2m": 21.4,
            "relative_humidity_2m": 55.0,
            "apparent_temperature": 20.1,
            "is_day": 1,
            "precipitation": 0.0,
            "rain": 0.0,
            "weather_code": 2,
            "cloud_cover": 40.0,
            "pressure_msl": 1013.2,
            "surface_pressure": 941.7,
            "wind_speed_10m": 14.0,
            "wind_direction_10m": 230.0,
            "wind_gusts_10m": 32.5
        }
    })
}

/// A forecast whose hourly window starts now, so the rendered strip is
/// non-empty regardless of when the test runs.
fn forecast_body() -> serde_json::Value {
    let start = Local::now().naive_local();
    let hours: Vec<String> = (0..24)
        .map(|h| (start + Duration::hours(h)).format("%Y-%m-%dT%H:%M").to_string())
        .collect();
    let days: Vec<String> = (0..7)
        .map(|d| (start + Duration::days(d)).format("%Y-%m-%d").to_string())
        .collect();
    let sunrises: Vec<String> = (0..7)
        .map(|d| (start + Duration::days(d)).format("%Y-%m-%dT07:21").to_string())
        .collect();
    let sunsets: Vec<String> = (0..7)
        .map(|d| (start + Duration::days(d)).format("%Y-%m-%dT20:42").to_string())
        .collect();

    json!({
        "hourly": {
            "time": hours,
            "temperature_2m": vec![20.0; 24],
            "precipitation_probability": vec![10; 24],
            "weather_code": vec![2; 24],
            "is_day": vec![1; 24]
        },
        "daily": {
            "time": days,
            "weather_code": vec![61; 7],
            "temperature_2m_max": vec![24.0; 7],
            "temperature_2m_min": vec![15.0; 7],
            "precipitation_probability_max": vec![30; 7],
            "wind_speed_10m_max": vec![18.0; 7],
            "sunrise": sunrises,
            "sunset": sunsets
        }
    })
}

async fn mount_weather_endpoints(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param_contains("current", "temperature_2m"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param_contains("hourly", "temperature_2m"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .mount(server)
        .await;
}

fn app_for(server: &MockServer) -> WeatherApp<RecordingView> {
    let client = OpenMeteoClient::with_base_urls(server.uri(), server.uri());
    WeatherApp::new(client, Box::new(NoLocator), RecordingView::default())
}

fn assert_all_regions(app: &WeatherApp<RecordingView>, expected: &RegionState) {
    let regions = app.regions();
    assert_eq!(&regions.current, expected);
    assert_eq!(&regions.hourly, expected);
    assert_eq!(&regions.daily, expected);
}

#[tokio::test]
async fn search_by_name_populates_all_regions() {
    let server = MockServer::start().await;
    mount_weather_endpoints(&server).await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("name", "Madrid"))
        .and(query_param("count", "1"))
        .and(query_param("language", "es"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{
                "name": "Madrid",
                "admin1": "Comunidad de Madrid",
                "country": "España",
                "latitude": 40.4168,
                "longitude": -3.7038
            }]
        })))
        .mount(&server)
        .await;

    let mut app = app_for(&server);
    app.handle_search("Madrid").await;

    assert_all_regions(&app, &RegionState::Populated);
    assert_eq!(
        app.location().unwrap().display_name,
        "Madrid, Comunidad de Madrid, España"
    );

    let view = app.view();
    assert_eq!(view.loading_shown, 1);
    assert!(view.errors.is_empty());

    let (shown_name, reading) = view.current.as_ref().unwrap();
    assert_eq!(shown_name, "Madrid, Comunidad de Madrid, España");
    assert_eq!(reading.temperature_c, 21.4);

    assert_eq!(view.hourly.as_ref().unwrap().len(), 12);
    let labels = view.daily_labels.as_ref().unwrap();
    assert_eq!(labels.len(), 7);
    assert_eq!(labels[0], "Hoy");
}

#[tokio::test]
async fn geocoding_no_match_errors_without_weather_fetch() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
        .mount(&server)
        .await;

    // No weather fetch may happen on a failed search.
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut app = app_for(&server);
    app.handle_search("Atlántida").await;

    assert_all_regions(&app, &RegionState::Error(MSG_NOT_FOUND.to_string()));
    assert!(app.location().is_none());
    assert_eq!(app.view().errors, vec![MSG_NOT_FOUND.to_string()]);
}

#[tokio::test]
async fn coordinate_search_bypasses_geocoding() {
    let server = MockServer::start().await;
    mount_weather_endpoints(&server).await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut app = app_for(&server);
    app.handle_search("40.4168, -3.7038").await;

    assert_all_regions(&app, &RegionState::Populated);
    let location = app.location().unwrap();
    assert_eq!(location.display_name, "40.4168, -3.7038");
    assert_eq!(location.latitude, 40.4168);
    assert_eq!(location.longitude, -3.7038);
}

#[tokio::test]
async fn forecast_failure_errors_every_region() {
    let server = MockServer::start().await;

    // Current succeeds, forecast does not: no partial render is allowed.
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param_contains("current", "temperature_2m"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param_contains("hourly", "temperature_2m"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let mut app = app_for(&server);
    app.handle_search("40.4168, -3.7038").await;

    assert_all_regions(&app, &RegionState::Error(MSG_LOAD_FAILED.to_string()));
    assert!(app.location().is_none());
    let view = app.view();
    assert!(view.current.is_none());
    assert!(view.hourly.is_none());
    assert!(view.daily_labels.is_none());
}

#[tokio::test]
async fn empty_and_whitespace_input_changes_nothing() {
    let server = MockServer::start().await;
    mount_weather_endpoints(&server).await;

    let mut app = app_for(&server);
    app.handle_search("40.4168, -3.7038").await;
    let populated = app.regions().clone();

    app.handle_search("").await;
    app.handle_search("   \t ").await;

    assert_eq!(app.regions(), &populated);
    assert_eq!(app.view().loading_shown, 1);
    assert!(app.view().errors.is_empty());
}

#[tokio::test]
async fn device_location_loads_with_fixed_label() {
    let server = MockServer::start().await;
    mount_weather_endpoints(&server).await;

    let client = OpenMeteoClient::with_base_urls(server.uri(), server.uri());
    let locator = FixedLocator(GeoFix {
        latitude: 47.3769,
        longitude: 8.5417,
    });
    let mut app = WeatherApp::new(client, Box::new(locator), RecordingView::default());

    app.use_device_location().await;

    assert_all_regions(&app, &RegionState::Populated);
    assert_eq!(app.location().unwrap().display_name, "Tu ubicación");
    // Control disabled for the duration of the request, re-enabled after.
    assert_eq!(app.view().locating_calls, vec![true, false]);
}

#[tokio::test]
async fn device_location_denied_errors_and_releases_control() {
    let server = MockServer::start().await;

    let client = OpenMeteoClient::with_base_urls(server.uri(), server.uri());
    let mut app = WeatherApp::new(client, Box::new(DeniedLocator), RecordingView::default());

    app.use_device_location().await;

    assert_all_regions(&app, &RegionState::Error(MSG_GEOLOCATION_FAILED.to_string()));
    assert_eq!(app.view().locating_calls, vec![true, false]);
}

#[tokio::test]
async fn missing_location_service_gets_its_own_message() {
    let server = MockServer::start().await;

    let client = OpenMeteoClient::with_base_urls(server.uri(), server.uri());
    let mut app = WeatherApp::new(client, Box::new(NoLocator), RecordingView::default());

    app.use_device_location().await;

    assert_all_regions(
        &app,
        &RegionState::Error(MSG_GEOLOCATION_UNAVAILABLE.to_string()),
    );
}

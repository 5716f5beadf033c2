//! Terminal renderer for the three display regions.

use meteo_core::{CurrentReading, DailyEntry, HourlyPoint, WeatherView};

pub struct TerminalView;

impl TerminalView {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TerminalView {
    fn default() -> Self {
        Self::new()
    }
}

// Whole degrees as i32 so -0.4 doesn't show up as -0.
fn round(value: f64) -> i32 {
    value.round() as i32
}

impl WeatherView for TerminalView {
    fn show_loading(&mut self) {
        println!("Cargando datos meteorológicos...");
    }

    fn show_error(&mut self, message: &str) {
        println!("⚠️  {message}");
    }

    fn show_current(&mut self, location: &str, reading: &CurrentReading) {
        println!();
        println!(
            "{}°  {}  {}",
            round(reading.temperature_c),
            reading.code.icon(reading.is_day),
            reading.code.description()
        );
        println!("{location}");
        println!("Sensación térmica: {}°C", round(reading.feels_like_c));
        println!();
        println!("  Humedad         {:>4}%", reading.humidity_pct);
        println!("  Viento          {:>4} km/h", round(reading.wind_speed_kmh));
        println!("  Presión         {:>4} hPa", round(reading.pressure_msl_hpa));
        println!("  Nubosidad       {:>4}%", reading.cloud_cover_pct);
        println!("  Precipitación   {:>4} mm", reading.precipitation_mm);
        println!("  Ráfagas         {:>4} km/h", round(reading.wind_gusts_kmh));
    }

    fn show_hourly(&mut self, entries: &[HourlyPoint]) {
        println!();
        println!("Próximas horas");
        for point in entries {
            println!(
                "  {}  {}  {:>3}°  {:>3}% 🌧️",
                point.time.format("%H:%M"),
                point.code.icon(point.is_day),
                round(point.temperature_c),
                point.precipitation_probability_pct,
            );
        }
    }

    fn show_daily(&mut self, entries: &[DailyEntry]) {
        println!();
        println!("Próximos días");
        for entry in entries {
            let day = &entry.day;
            println!(
                "  {:<9}  {}  {:<28}  {:>3}°/{:>3}°  {:>3}% 🌧️  {:>3} km/h 💨",
                entry.label,
                day.code.icon(true),
                day.code.description(),
                round(day.temperature_max_c),
                round(day.temperature_min_c),
                day.precipitation_probability_max_pct,
                round(day.wind_speed_max_kmh),
            );
        }
    }

    fn set_locating(&mut self, busy: bool) {
        if busy {
            println!("🔄 Obteniendo ubicación...");
        }
    }
}

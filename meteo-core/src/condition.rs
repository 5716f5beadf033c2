//! WMO weather interpretation codes as a closed enumeration.
//!
//! Open-Meteo reports conditions as small integers from the WMO 4677 code
//! table. Only the codes the service actually emits are modeled; anything
//! else maps to [`WeatherCode::Unknown`] and renders as a sentinel glyph
//! instead of failing.
//! See: https://open-meteo.com/en/docs#weathervariables

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCode {
    ClearSky,
    MainlyClear,
    PartlyCloudy,
    Overcast,
    Fog,
    RimeFog,
    LightDrizzle,
    ModerateDrizzle,
    DenseDrizzle,
    LightFreezingDrizzle,
    DenseFreezingDrizzle,
    SlightRain,
    ModerateRain,
    HeavyRain,
    LightFreezingRain,
    HeavyFreezingRain,
    SlightSnowfall,
    ModerateSnowfall,
    HeavySnowfall,
    SnowGrains,
    SlightShowers,
    ModerateShowers,
    ViolentShowers,
    SlightSnowShowers,
    HeavySnowShowers,
    Thunderstorm,
    ThunderstormSlightHail,
    ThunderstormHeavyHail,
    Unknown,
}

impl WeatherCode {
    /// Convert a raw WMO code. Never fails; unrecognized codes become
    /// [`WeatherCode::Unknown`].
    pub fn from_wmo(code: u16) -> Self {
        match code {
            0 => Self::ClearSky,
            1 => Self::MainlyClear,
            2 => Self::PartlyCloudy,
            3 => Self::Overcast,
            45 => Self::Fog,
            48 => Self::RimeFog,
            51 => Self::LightDrizzle,
            53 => Self::ModerateDrizzle,
            55 => Self::DenseDrizzle,
            56 => Self::LightFreezingDrizzle,
            57 => Self::DenseFreezingDrizzle,
            61 => Self::SlightRain,
            63 => Self::ModerateRain,
            65 => Self::HeavyRain,
            66 => Self::LightFreezingRain,
            67 => Self::HeavyFreezingRain,
            71 => Self::SlightSnowfall,
            73 => Self::ModerateSnowfall,
            75 => Self::HeavySnowfall,
            77 => Self::SnowGrains,
            80 => Self::SlightShowers,
            81 => Self::ModerateShowers,
            82 => Self::ViolentShowers,
            85 => Self::SlightSnowShowers,
            86 => Self::HeavySnowShowers,
            95 => Self::Thunderstorm,
            96 => Self::ThunderstormSlightHail,
            99 => Self::ThunderstormHeavyHail,
            _ => Self::Unknown,
        }
    }

    /// Human-readable condition text (the widget's fixed Spanish set).
    pub fn description(&self) -> &'static str {
        match self {
            Self::ClearSky => "Cielo despejado",
            Self::MainlyClear => "Principalmente despejado",
            Self::PartlyCloudy => "Parcialmente nublado",
            Self::Overcast => "Nublado",
            Self::Fog => "Niebla",
            Self::RimeFog => "Niebla con escarcha",
            Self::LightDrizzle => "Llovizna ligera",
            Self::ModerateDrizzle => "Llovizna moderada",
            Self::DenseDrizzle => "Llovizna intensa",
            Self::LightFreezingDrizzle => "Llovizna helada ligera",
            Self::DenseFreezingDrizzle => "Llovizna helada intensa",
            Self::SlightRain => "Lluvia ligera",
            Self::ModerateRain => "Lluvia moderada",
            Self::HeavyRain => "Lluvia intensa",
            Self::LightFreezingRain => "Lluvia helada ligera",
            Self::HeavyFreezingRain => "Lluvia helada intensa",
            Self::SlightSnowfall => "Nevada ligera",
            Self::ModerateSnowfall => "Nevada moderada",
            Self::HeavySnowfall => "Nevada intensa",
            Self::SnowGrains => "Granos de nieve",
            Self::SlightShowers => "Chubascos ligeros",
            Self::ModerateShowers => "Chubascos moderados",
            Self::ViolentShowers => "Chubascos violentos",
            Self::SlightSnowShowers => "Chubascos de nieve ligeros",
            Self::HeavySnowShowers => "Chubascos de nieve intensos",
            Self::Thunderstorm => "Tormenta",
            Self::ThunderstormSlightHail => "Tormenta con granizo ligero",
            Self::ThunderstormHeavyHail => "Tormenta con granizo intenso",
            Self::Unknown => "Desconocido",
        }
    }

    /// Display glyph. Clear-sky codes differ between day and night.
    pub fn icon(&self, is_day: bool) -> &'static str {
        match self {
            Self::ClearSky => {
                if is_day {
                    "☀️"
                } else {
                    "🌙"
                }
            }
            Self::MainlyClear => {
                if is_day {
                    "🌤️"
                } else {
                    "🌙"
                }
            }
            Self::PartlyCloudy => "⛅",
            Self::Overcast => "☁️",
            Self::Fog | Self::RimeFog => "🌫️",
            Self::LightDrizzle | Self::ModerateDrizzle | Self::DenseDrizzle => "🌦️",
            Self::LightFreezingDrizzle | Self::DenseFreezingDrizzle => "🌨️",
            Self::SlightRain | Self::ModerateRain | Self::HeavyRain => "🌧️",
            Self::LightFreezingRain | Self::HeavyFreezingRain => "🌨️",
            Self::SlightSnowfall => "🌨️",
            Self::ModerateSnowfall | Self::HeavySnowfall => "❄️",
            Self::SnowGrains => "🌨️",
            Self::SlightShowers => "🌦️",
            Self::ModerateShowers => "🌧️",
            Self::ViolentShowers => "⛈️",
            Self::SlightSnowShowers => "🌨️",
            Self::HeavySnowShowers => "❄️",
            Self::Thunderstorm | Self::ThunderstormSlightHail | Self::ThunderstormHeavyHail => {
                "⛈️"
            }
            Self::Unknown => "❓",
        }
    }
}

//! Threshold-based alert flags

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::record::WeatherRecord;

/// Categorical alert raised by a single record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Flag {
    LowTemperature,
    HighTemperature,
    WindChill,
    HeatIndex,
    LowVisibility,
    HighWindSpeed,
    HighWindGusts,
    UvIndexAdvisory,
    AirQualityAdvisory,
}

impl Flag {
    /// Human-readable advisory text
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Flag::LowTemperature => "Low Temperature",
            Flag::HighTemperature => "High Temperature",
            Flag::WindChill => "Wind Chill",
            Flag::HeatIndex => "Heat Index",
            Flag::LowVisibility => "Low Visibility",
            Flag::HighWindSpeed => "High Wind Speed",
            Flag::HighWindGusts => "High Wind Gusts",
            Flag::UvIndexAdvisory => "UV Index - Use Sunscreen",
            Flag::AirQualityAdvisory => "Air Quality - Limit Exertion",
        }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Evaluate every alert rule against one record.
///
/// Rules are independent and any subset may fire together; output order is
/// the fixed rule order. The air-quality rule stays silent while `us_aqi` is
/// absent.
#[must_use]
pub fn evaluate(record: &WeatherRecord) -> Vec<Flag> {
    let mut flags = Vec::new();

    if record.temperature_2m < 30.0 {
        flags.push(Flag::LowTemperature);
    }
    if record.temperature_2m > 80.0 {
        flags.push(Flag::HighTemperature);
    }
    if record.temperature_2m < 30.0 && record.apparent_temperature < 0.0 {
        flags.push(Flag::WindChill);
    }
    if record.temperature_2m > 70.0 && record.apparent_temperature > 85.0 {
        flags.push(Flag::HeatIndex);
    }
    if record.visibility < 5000.0 {
        flags.push(Flag::LowVisibility);
    }
    if record.wind_speed_10m > 20.0 {
        flags.push(Flag::HighWindSpeed);
    }
    if record.wind_gusts_10m > 30.0 {
        flags.push(Flag::HighWindGusts);
    }
    if record.uv_index >= 3.0 {
        flags.push(Flag::UvIndexAdvisory);
    }
    if record.us_aqi.is_some_and(|us_aqi| us_aqi > 100.0) {
        flags.push(Flag::AirQualityAdvisory);
    }

    flags
}

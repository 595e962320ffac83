//! Outdoor desirability scoring
//!
//! Combines eight independently normalized sub-scores into one 0-100 rating,
//! each sub-score landing roughly on a 0-100 scale where 100 is ideal.
//! Weights: apparent temperature 30%, UV index 20%, precipitation probability
//! 15%, visibility 5%, cloud cover 10%, wind speed 10%, wind gusts 5%, air
//! moisture 5%.

use serde::Serialize;

use crate::error::WalkcastError;
use crate::humidity::absolute_humidity;
use crate::models::record::WeatherRecord;

/// Default ideal apparent temperature, °F
pub const DEFAULT_IDEAL_TEMP: f64 = 70.0;

/// Ideal apparent temperature in °F, restricted to the open interval (20, 100).
///
/// The bounds keep both penalty-curve log bases (`100 - ideal` and
/// `ideal - 20`) positive. Construction rejects out-of-range values, so every
/// scoring call afterwards is total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct IdealTemp(f64);

impl IdealTemp {
    /// Validate and wrap an ideal temperature.
    pub fn new(value: f64) -> Result<Self, WalkcastError> {
        if value <= 20.0 || value >= 100.0 {
            return Err(WalkcastError::validation(format!(
                "ideal temperature must lie strictly between 20 and 100 °F, got {value}"
            )));
        }
        Ok(Self(value))
    }

    /// The wrapped temperature in °F
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for IdealTemp {
    fn default() -> Self {
        Self(DEFAULT_IDEAL_TEMP)
    }
}

/// The individual sub-scores that make up one rating.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ScoreBreakdown {
    pub apparent_temperature: f64,
    pub uv_index: f64,
    pub precipitation_probability: f64,
    pub visibility: f64,
    pub cloud_cover: f64,
    pub wind_speed: f64,
    pub wind_gusts: f64,
    pub air_moisture: f64,
}

impl ScoreBreakdown {
    /// Weighted sum of the sub-scores.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.apparent_temperature * 0.30
            + self.uv_index * 0.20
            + self.precipitation_probability * 0.15
            + self.visibility * 0.05
            + self.cloud_cover * 0.10
            + self.wind_speed * 0.10
            + self.wind_gusts * 0.05
            + self.air_moisture * 0.05
    }
}

/// Desirability rating in [0, 100]; higher is better walking weather.
#[must_use]
pub fn rating(record: &WeatherRecord, ideal_temp: IdealTemp) -> f64 {
    breakdown(record, ideal_temp).total()
}

/// Sub-score breakdown for one record against an ideal temperature.
#[must_use]
pub fn breakdown(record: &WeatherRecord, ideal_temp: IdealTemp) -> ScoreBreakdown {
    ScoreBreakdown {
        apparent_temperature: apparent_temperature_score(
            record.apparent_temperature,
            ideal_temp.value(),
        ),
        uv_index: uv_index_score(record.uv_index),
        precipitation_probability: precipitation_probability_score(
            record.precipitation_probability,
        ),
        visibility: visibility_score(record.visibility),
        cloud_cover: cloud_cover_score(record.cloud_cover, record.apparent_temperature),
        wind_speed: wind_speed_score(record.wind_speed_10m, record.apparent_temperature),
        wind_gusts: wind_gusts_score(record.wind_gusts_10m, record.apparent_temperature),
        air_moisture: air_moisture_score(record.temperature_2m, record.relative_humidity_2m),
    }
}

fn base_log(base: f64, x: f64) -> f64 {
    x.ln() / base.ln()
}

fn min_zero(score: f64) -> f64 {
    score.max(0.0)
}

/// Distance from the ideal apparent temperature on an asymmetric power curve:
/// deviations to the hot side decay on the `100 - ideal` base, deviations to
/// the cold side on the `ideal - 20` base.
fn apparent_temperature_score(apparent_temperature: f64, ideal_temp: f64) -> f64 {
    let difference = (apparent_temperature - ideal_temp).abs();

    min_zero(if apparent_temperature >= ideal_temp {
        100.0 - difference.powf(base_log(100.0 - ideal_temp, 100.0))
    } else {
        100.0 - difference.powf(base_log(ideal_temp - 20.0, 100.0))
    })
}

fn uv_index_score(uv_index: f64) -> f64 {
    (uv_index * 10.0 - 100.0).abs()
}

fn precipitation_probability_score(precipitation_probability: f64) -> f64 {
    (precipitation_probability - 100.0).abs()
}

/// Saturates at 100 once visibility reaches 50 km.
fn visibility_score(visibility: f64) -> f64 {
    if visibility >= 50000.0 {
        100.0
    } else {
        visibility * (100.0 / 50000.0)
    }
}

/// Below 80 °F clear skies are best; at or above, cloud cover near 35% acts
/// as shade, with too little shade penalized harder than too much.
fn cloud_cover_score(cloud_cover: f64, apparent_temperature: f64) -> f64 {
    if apparent_temperature < 80.0 {
        return (cloud_cover - 100.0).abs();
    }

    let difference = (cloud_cover - 35.0).abs();
    if cloud_cover > 35.0 {
        100.0 - difference * 1.53
    } else {
        100.0 - difference * 2.85
    }
}

/// In hot weather a breeze near 5 mph is rewarded; otherwise wind is a
/// straight penalty.
fn wind_speed_score(wind_speed: f64, apparent_temperature: f64) -> f64 {
    min_zero(if apparent_temperature >= 80.0 {
        100.0 - (wind_speed - 5.0).abs().powf(base_log(25.0, 100.0))
    } else {
        100.0 - wind_speed.powf(base_log(25.0, 100.0))
    })
}

fn wind_gusts_score(wind_gusts: f64, apparent_temperature: f64) -> f64 {
    min_zero(if apparent_temperature >= 80.0 {
        100.0 - (wind_gusts - 5.0).abs().powf(base_log(35.0, 100.0))
    } else {
        100.0 - wind_gusts.powf(base_log(35.0, 100.0))
    })
}

/// Distance of derived absolute humidity from the 8 g/m³ ideal.
fn air_moisture_score(temperature_2m: f64, relative_humidity_2m: f64) -> f64 {
    let difference = (absolute_humidity(temperature_2m, relative_humidity_2m) - 8.0).abs();
    min_zero(100.0 - difference.powf(base_log(20.0, 100.0)))
}

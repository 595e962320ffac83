//! Per-timestamp weather rows and their rated wrapper

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::flags::{self, Flag};
use crate::models::series::{DailySeries, ForecastSeries};
use crate::scoring::{self, IdealTemp};

/// One row of a fine-grained forecast series.
///
/// Immutable once constructed. `us_aqi` stays absent until the air-quality
/// merge attaches it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    /// Timestamp for this forecast row (UTC)
    pub time: DateTime<Utc>,
    /// Air temperature at 2 m, °F
    pub temperature_2m: f64,
    /// Relative humidity at 2 m, percent
    pub relative_humidity_2m: f64,
    /// Feels-like temperature, °F
    pub apparent_temperature: f64,
    /// Probability of precipitation, percent
    pub precipitation_probability: f64,
    /// Total cloud cover, percent
    pub cloud_cover: f64,
    /// Viewing distance, meters
    pub visibility: f64,
    /// Wind speed at 10 m, mph
    pub wind_speed_10m: f64,
    /// Wind gusts at 10 m, mph
    pub wind_gusts_10m: f64,
    /// UV index, dimensionless
    pub uv_index: f64,
    /// Whether the sun is up at this timestamp
    pub is_day: bool,
    /// US air quality index, attached by the air-quality merge
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub us_aqi: Option<f64>,
}

impl WeatherRecord {
    /// New record identical to this one with `us_aqi` attached.
    #[must_use]
    pub fn with_us_aqi(mut self, us_aqi: f64) -> Self {
        self.us_aqi = Some(us_aqi);
        self
    }
}

/// One row of the daily-cadence series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    /// Timestamp marking the start of the day (UTC)
    pub time: DateTime<Utc>,
    /// Daily maximum air temperature, °F
    pub temperature_2m_max: f64,
    /// Sunrise instant (UTC)
    pub sunrise: DateTime<Utc>,
    /// Sunset instant (UTC)
    pub sunset: DateTime<Utc>,
    /// Dominant wind direction over the day, degrees
    pub wind_direction_10m_dominant: f64,
}

/// A weather record together with its desirability rating and alert flags.
///
/// Rating and flags are pure functions of the stored record; both are
/// computed once when the record is wrapped and read back on demand.
#[derive(Debug, Clone, Serialize)]
pub struct RatedRecord {
    record: WeatherRecord,
    ideal_temp: IdealTemp,
    rating: f64,
    flags: Vec<Flag>,
}

impl RatedRecord {
    /// Wrap a record, computing its rating against `ideal_temp` and its flags.
    #[must_use]
    pub fn new(record: WeatherRecord, ideal_temp: IdealTemp) -> Self {
        let rating = scoring::rating(&record, ideal_temp);
        let flags = flags::evaluate(&record);
        Self {
            record,
            ideal_temp,
            rating,
            flags,
        }
    }

    /// The underlying weather record
    #[must_use]
    pub fn record(&self) -> &WeatherRecord {
        &self.record
    }

    /// The ideal temperature this record was rated against
    #[must_use]
    pub fn ideal_temp(&self) -> IdealTemp {
        self.ideal_temp
    }

    /// Desirability rating in [0, 100]; higher is better walking weather
    #[must_use]
    pub fn rating(&self) -> f64 {
        self.rating
    }

    /// Alert flags raised by this record, in rule order
    #[must_use]
    pub fn flags(&self) -> &[Flag] {
        &self.flags
    }
}

/// Everything one provider round-trip yields, all timestamps already UTC.
#[derive(Debug, Clone, Default)]
pub struct ForecastBundle {
    /// Conditions at request time, when the provider sent them
    pub current: Option<WeatherRecord>,
    /// 15-minute cadence series, when the provider covers the region
    pub minutely_15: Option<ForecastSeries>,
    /// Hourly cadence series
    pub hourly: ForecastSeries,
    /// Daily cadence series
    pub daily: DailySeries,
}

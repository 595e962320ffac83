//! Columnar forecast series and their row transposition
//!
//! The provider delivers each cadence as a struct of arrays: one shared `time`
//! vector plus one vector per measured field. Transposition reads index `i`
//! from every field vector to build record `i`, after checking that all field
//! vectors share `time`'s length. A mismatch fails the whole parse; there is
//! no partial output.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::WalkcastError;
use crate::models::record::{DailySummary, WeatherRecord};

/// Fine-grained columnar series, used for the hourly and 15-minute cadences.
///
/// Units: °F, mph, meters for visibility, 0-100 percentages. `is_day` comes
/// from the provider as 0/1.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForecastSeries {
    pub time: Vec<DateTime<Utc>>,
    pub temperature_2m: Vec<f64>,
    pub relative_humidity_2m: Vec<f64>,
    pub apparent_temperature: Vec<f64>,
    pub precipitation_probability: Vec<f64>,
    pub cloud_cover: Vec<f64>,
    pub visibility: Vec<f64>,
    pub wind_speed_10m: Vec<f64>,
    pub wind_gusts_10m: Vec<f64>,
    pub uv_index: Vec<f64>,
    pub is_day: Vec<f64>,
}

impl ForecastSeries {
    /// Number of timestamps in the series
    #[must_use]
    pub fn len(&self) -> usize {
        self.time.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    fn check_shape(&self) -> Result<(), WalkcastError> {
        let expected = self.time.len();
        let fields = [
            ("temperature_2m", self.temperature_2m.len()),
            ("relative_humidity_2m", self.relative_humidity_2m.len()),
            ("apparent_temperature", self.apparent_temperature.len()),
            ("precipitation_probability", self.precipitation_probability.len()),
            ("cloud_cover", self.cloud_cover.len()),
            ("visibility", self.visibility.len()),
            ("wind_speed_10m", self.wind_speed_10m.len()),
            ("wind_gusts_10m", self.wind_gusts_10m.len()),
            ("uv_index", self.uv_index.len()),
            ("is_day", self.is_day.len()),
        ];

        for (field, actual) in fields {
            if actual != expected {
                return Err(WalkcastError::shape(format!(
                    "field `{field}` has {actual} values, expected {expected} to match `time`"
                )));
            }
        }
        Ok(())
    }

    /// Transpose the series into per-timestamp records, in `time` order.
    ///
    /// The series is assumed already time-ordered by the provider; no sorting
    /// happens here. `us_aqi` starts absent on every record.
    pub fn into_records(self) -> Result<Vec<WeatherRecord>, WalkcastError> {
        self.check_shape()?;

        let mut records = Vec::with_capacity(self.time.len());
        for i in 0..self.time.len() {
            records.push(WeatherRecord {
                time: self.time[i],
                temperature_2m: self.temperature_2m[i],
                relative_humidity_2m: self.relative_humidity_2m[i],
                apparent_temperature: self.apparent_temperature[i],
                precipitation_probability: self.precipitation_probability[i],
                cloud_cover: self.cloud_cover[i],
                visibility: self.visibility[i],
                wind_speed_10m: self.wind_speed_10m[i],
                wind_gusts_10m: self.wind_gusts_10m[i],
                uv_index: self.uv_index[i],
                is_day: self.is_day[i] != 0.0,
                us_aqi: None,
            });
        }
        Ok(records)
    }
}

/// Daily-cadence columnar series.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DailySeries {
    pub time: Vec<DateTime<Utc>>,
    pub temperature_2m_max: Vec<f64>,
    pub sunrise: Vec<DateTime<Utc>>,
    pub sunset: Vec<DateTime<Utc>>,
    pub wind_direction_10m_dominant: Vec<f64>,
}

impl DailySeries {
    /// Number of days in the series
    #[must_use]
    pub fn len(&self) -> usize {
        self.time.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    fn check_shape(&self) -> Result<(), WalkcastError> {
        let expected = self.time.len();
        let fields = [
            ("temperature_2m_max", self.temperature_2m_max.len()),
            ("sunrise", self.sunrise.len()),
            ("sunset", self.sunset.len()),
            ("wind_direction_10m_dominant", self.wind_direction_10m_dominant.len()),
        ];

        for (field, actual) in fields {
            if actual != expected {
                return Err(WalkcastError::shape(format!(
                    "field `{field}` has {actual} values, expected {expected} to match `time`"
                )));
            }
        }
        Ok(())
    }

    /// Transpose the series into per-day summaries, in `time` order.
    pub fn into_summaries(self) -> Result<Vec<DailySummary>, WalkcastError> {
        self.check_shape()?;

        let mut summaries = Vec::with_capacity(self.time.len());
        for i in 0..self.time.len() {
            summaries.push(DailySummary {
                time: self.time[i],
                temperature_2m_max: self.temperature_2m_max[i],
                sunrise: self.sunrise[i],
                sunset: self.sunset[i],
                wind_direction_10m_dominant: self.wind_direction_10m_dominant[i],
            });
        }
        Ok(summaries)
    }
}

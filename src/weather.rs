//! Open-Meteo client for forecast, air-quality and geocoding data
//!
//! All requests ask the provider for °F / mph / inch units and UTC
//! timestamps, so everything downstream works on absolute UTC instants.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use tracing::debug;

use crate::config::WeatherConfig;
use crate::merge::AirQualitySample;
use crate::models::{DailySeries, ForecastBundle, ForecastSeries, Location, WeatherRecord};

const FINE_FIELDS: &str = "temperature_2m,relative_humidity_2m,apparent_temperature,precipitation_probability,cloud_cover,visibility,wind_speed_10m,wind_gusts_10m,uv_index,is_day";
const DAILY_FIELDS: &str = "temperature_2m_max,sunrise,sunset,wind_direction_10m_dominant";

/// HTTP client for the Open-Meteo forecast, air-quality and geocoding APIs.
///
/// Transient failures are retried with exponential backoff via middleware;
/// nothing downstream of this client retries anything.
pub struct WeatherClient {
    http: ClientWithMiddleware,
    forecast_url: String,
    air_quality_url: String,
    geocoding_url: String,
}

impl WeatherClient {
    /// Build a client from the weather section of the configuration.
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(u64::from(config.timeout_seconds)))
            .build()
            .context("Failed to build HTTP client")?;

        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.max_retries);
        let http = ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            http,
            forecast_url: config.forecast_url.clone(),
            air_quality_url: config.air_quality_url.clone(),
            geocoding_url: config.geocoding_url.clone(),
        })
    }

    /// Fetch the multi-cadence forecast bundle for a location.
    pub async fn forecast(&self, location: &Location) -> Result<ForecastBundle> {
        let url = format!(
            "{}?latitude={}&longitude={}&current={FINE_FIELDS}&minutely_15={FINE_FIELDS}&hourly={FINE_FIELDS}&daily={DAILY_FIELDS}&temperature_unit=fahrenheit&wind_speed_unit=mph&precipitation_unit=inch&timezone=UTC",
            self.forecast_url, location.latitude, location.longitude
        );

        debug!("Fetching forecast for {}", location.name);
        let response: openmeteo::ForecastResponse = self
            .http
            .get(&url)
            .send()
            .await
            .context("Open-Meteo forecast request failed")?
            .error_for_status()
            .context("Open-Meteo forecast request rejected")?
            .json()
            .await
            .context("Failed to parse Open-Meteo forecast response")?;

        bundle_from_response(response)
    }

    /// Fetch the hourly `us_aqi` series for a location.
    pub async fn air_quality(&self, location: &Location) -> Result<Vec<AirQualitySample>> {
        let url = format!(
            "{}?latitude={}&longitude={}&hourly=us_aqi&timezone=UTC",
            self.air_quality_url, location.latitude, location.longitude
        );

        debug!("Fetching air quality for {}", location.name);
        let response: openmeteo::AirQualityResponse = self
            .http
            .get(&url)
            .send()
            .await
            .context("Open-Meteo air-quality request failed")?
            .error_for_status()
            .context("Open-Meteo air-quality request rejected")?
            .json()
            .await
            .context("Failed to parse Open-Meteo air-quality response")?;

        samples_from_response(response)
    }

    /// Resolve a place name or postal code to candidate locations.
    pub async fn geocode(&self, name: &str) -> Result<Vec<Location>> {
        let url = format!(
            "{}?name={}&count=5&language=en&format=json",
            self.geocoding_url,
            urlencoding::encode(name)
        );

        let response: openmeteo::GeocodingResponse = self
            .http
            .get(&url)
            .send()
            .await
            .context("Open-Meteo geocoding request failed")?
            .error_for_status()
            .context("Open-Meteo geocoding request rejected")?
            .json()
            .await
            .context("Failed to parse Open-Meteo geocoding response")?;

        Ok(response
            .results
            .unwrap_or_default()
            .into_iter()
            .map(Location::from)
            .collect())
    }
}

fn parse_time(raw: &str) -> Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
        .map(|dt| dt.and_utc())
        .with_context(|| format!("Invalid timestamp in provider response: {raw}"))
}

fn parse_times(raw: &[String]) -> Result<Vec<DateTime<Utc>>> {
    raw.iter().map(|time| parse_time(time)).collect()
}

// Daily `time` values come back date-only; they mark the start of the day
fn parse_day(raw: &str) -> Result<DateTime<Utc>> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|date| date.and_hms_opt(0, 0, 0).unwrap().and_utc())
        .with_context(|| format!("Invalid date in provider response: {raw}"))
}

fn parse_days(raw: &[String]) -> Result<Vec<DateTime<Utc>>> {
    raw.iter().map(|day| parse_day(day)).collect()
}

fn bundle_from_response(response: openmeteo::ForecastResponse) -> Result<ForecastBundle> {
    let hourly = response
        .hourly
        .context("Forecast response missing hourly block")?;
    let daily = response
        .daily
        .context("Forecast response missing daily block")?;

    Ok(ForecastBundle {
        current: response.current.map(record_from_current).transpose()?,
        minutely_15: response.minutely_15.map(series_from_block).transpose()?,
        hourly: series_from_block(hourly)?,
        daily: daily_from_block(daily)?,
    })
}

fn series_from_block(block: openmeteo::SeriesBlock) -> Result<ForecastSeries> {
    Ok(ForecastSeries {
        time: parse_times(&block.time)?,
        temperature_2m: block.temperature_2m,
        relative_humidity_2m: block.relative_humidity_2m,
        apparent_temperature: block.apparent_temperature,
        precipitation_probability: block.precipitation_probability,
        cloud_cover: block.cloud_cover,
        visibility: block.visibility,
        wind_speed_10m: block.wind_speed_10m,
        wind_gusts_10m: block.wind_gusts_10m,
        uv_index: block.uv_index,
        is_day: block.is_day,
    })
}

fn daily_from_block(block: openmeteo::DailyBlock) -> Result<DailySeries> {
    Ok(DailySeries {
        time: parse_days(&block.time)?,
        temperature_2m_max: block.temperature_2m_max,
        sunrise: parse_times(&block.sunrise)?,
        sunset: parse_times(&block.sunset)?,
        wind_direction_10m_dominant: block.wind_direction_10m_dominant,
    })
}

fn record_from_current(block: openmeteo::CurrentBlock) -> Result<WeatherRecord> {
    Ok(WeatherRecord {
        time: parse_time(&block.time)?,
        temperature_2m: block.temperature_2m,
        relative_humidity_2m: block.relative_humidity_2m,
        apparent_temperature: block.apparent_temperature,
        precipitation_probability: block.precipitation_probability,
        cloud_cover: block.cloud_cover,
        visibility: block.visibility,
        wind_speed_10m: block.wind_speed_10m,
        wind_gusts_10m: block.wind_gusts_10m,
        uv_index: block.uv_index,
        is_day: block.is_day != 0.0,
        us_aqi: None,
    })
}

fn samples_from_response(response: openmeteo::AirQualityResponse) -> Result<Vec<AirQualitySample>> {
    let block = response.hourly;
    let mut samples = Vec::with_capacity(block.time.len());

    // The provider sends null outside its air-quality coverage window
    for (raw_time, us_aqi) in block.time.iter().zip(&block.us_aqi) {
        if let Some(us_aqi) = us_aqi {
            samples.push(AirQualitySample {
                time: parse_time(raw_time)?,
                us_aqi: *us_aqi,
            });
        }
    }
    Ok(samples)
}

/// `OpenMeteo` API response structures
mod openmeteo {
    use serde::Deserialize;

    use crate::models::Location;

    /// Forecast response: one block of parallel arrays per requested cadence
    #[derive(Debug, Deserialize)]
    pub(super) struct ForecastResponse {
        pub current: Option<CurrentBlock>,
        pub minutely_15: Option<SeriesBlock>,
        pub hourly: Option<SeriesBlock>,
        pub daily: Option<DailyBlock>,
    }

    /// Fine-grained cadence block (hourly and 15-minutely share the shape)
    #[derive(Debug, Deserialize)]
    pub(super) struct SeriesBlock {
        pub time: Vec<String>,
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

    /// Conditions at request time
    #[derive(Debug, Deserialize)]
    pub(super) struct CurrentBlock {
        pub time: String,
        pub temperature_2m: f64,
        pub relative_humidity_2m: f64,
        pub apparent_temperature: f64,
        pub precipitation_probability: f64,
        pub cloud_cover: f64,
        pub visibility: f64,
        pub wind_speed_10m: f64,
        pub wind_gusts_10m: f64,
        pub uv_index: f64,
        pub is_day: f64,
    }

    #[derive(Debug, Deserialize)]
    pub(super) struct DailyBlock {
        pub time: Vec<String>,
        pub temperature_2m_max: Vec<f64>,
        pub sunrise: Vec<String>,
        pub sunset: Vec<String>,
        pub wind_direction_10m_dominant: Vec<f64>,
    }

    #[derive(Debug, Deserialize)]
    pub(super) struct AirQualityResponse {
        pub hourly: AirQualityBlock,
    }

    #[derive(Debug, Deserialize)]
    pub(super) struct AirQualityBlock {
        pub time: Vec<String>,
        pub us_aqi: Vec<Option<f64>>,
    }

    /// Geocoding response from `OpenMeteo`
    #[derive(Debug, Deserialize)]
    pub(super) struct GeocodingResponse {
        pub results: Option<Vec<GeocodingResult>>,
    }

    #[derive(Debug, Deserialize)]
    pub(super) struct GeocodingResult {
        pub name: String,
        pub latitude: f64,
        pub longitude: f64,
        pub country: Option<String>,
    }

    impl From<GeocodingResult> for Location {
        fn from(result: GeocodingResult) -> Self {
            Self {
                latitude: result.latitude,
                longitude: result.longitude,
                name: result.name,
                country: result.country,
            }
        }
    }
}

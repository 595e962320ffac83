//! Configuration management for walkcast
//!
//! Handles loading configuration from an optional `walkcast.toml` file and
//! `WALKCAST_*` environment variables, and provides validation for all
//! configuration settings.

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::scoring::IdealTemp;

/// Root configuration structure for walkcast
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WalkcastConfig {
    /// Weather API configuration
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Default application settings
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Weather API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Base URL for the forecast API
    #[serde(default = "default_forecast_url")]
    pub forecast_url: String,
    /// Base URL for the air-quality API
    #[serde(default = "default_air_quality_url")]
    pub air_quality_url: String,
    /// Base URL for the geocoding API
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_weather_timeout")]
    pub timeout_seconds: u32,
    /// Maximum number of retries for failed requests
    #[serde(default = "default_weather_max_retries")]
    pub max_retries: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Default application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Ideal apparent temperature in °F
    #[serde(default = "default_ideal_temp")]
    pub ideal_temp: f64,
    /// Number of forecast days to report
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u32,
    /// Minimum daily maximum temperature (°F) for a day to count as walkable
    #[serde(default = "default_min_walk_temp")]
    pub min_walk_temp: f64,
}

// Default value functions
fn default_forecast_url() -> String {
    "https://api.open-meteo.com/v1/forecast".to_string()
}

fn default_air_quality_url() -> String {
    "https://air-quality-api.open-meteo.com/v1/air-quality".to_string()
}

fn default_geocoding_url() -> String {
    "https://geocoding-api.open-meteo.com/v1/search".to_string()
}

fn default_weather_timeout() -> u32 {
    30
}

fn default_weather_max_retries() -> u32 {
    3
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_ideal_temp() -> f64 {
    70.0
}

fn default_forecast_days() -> u32 {
    7
}

fn default_min_walk_temp() -> f64 {
    50.0
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            forecast_url: default_forecast_url(),
            air_quality_url: default_air_quality_url(),
            geocoding_url: default_geocoding_url(),
            timeout_seconds: default_weather_timeout(),
            max_retries: default_weather_max_retries(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            ideal_temp: default_ideal_temp(),
            forecast_days: default_forecast_days(),
            min_walk_temp: default_min_walk_temp(),
        }
    }
}

impl WalkcastConfig {
    /// Load configuration from file and environment sources.
    pub fn load() -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::with_name("walkcast").required(false))
            .add_source(Environment::with_prefix("WALKCAST").separator("__"))
            .build()
            .context("Failed to read configuration sources")?;

        let config: Self = settings
            .try_deserialize()
            .context("Invalid configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all configuration settings.
    pub fn validate(&self) -> Result<()> {
        IdealTemp::new(self.defaults.ideal_temp)
            .context("Invalid `defaults.ideal_temp` setting")?;

        if !(1..=16).contains(&self.defaults.forecast_days) {
            anyhow::bail!(
                "`defaults.forecast_days` must be between 1 and 16, got {}",
                self.defaults.forecast_days
            );
        }
        if self.weather.timeout_seconds == 0 {
            anyhow::bail!("`weather.timeout_seconds` must be positive");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = WalkcastConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.defaults.ideal_temp, 70.0);
        assert_eq!(config.defaults.forecast_days, 7);
        assert!(config.weather.forecast_url.contains("open-meteo"));
    }

    #[test]
    fn test_out_of_domain_ideal_temp_fails_validation() {
        let mut config = WalkcastConfig::default();
        config.defaults.ideal_temp = 150.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_forecast_days_fails_validation() {
        let mut config = WalkcastConfig::default();
        config.defaults.forecast_days = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_sections_deserialize_with_defaults() {
        let config: WalkcastConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.weather.max_retries, 3);
        assert_eq!(config.logging.level, "info");
    }
}

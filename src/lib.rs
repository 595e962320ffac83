//! Walkcast - find the best hours for a walk
//!
//! This library ingests columnar, multi-cadence weather forecasts from
//! Open-Meteo, merges the hourly air-quality series into them, buckets the
//! records into calendar days, and rates every timestamp for outdoor
//! desirability.

pub mod config;
pub mod error;
pub mod flags;
pub mod humidity;
pub mod merge;
pub mod models;
pub mod planner;
pub mod scoring;
pub mod weather;

// Re-export core types for public API
pub use config::WalkcastConfig;
pub use error::WalkcastError;
pub use flags::Flag;
pub use merge::{AirQualitySample, merge_air_quality};
pub use models::{
    DailySeries, DailySummary, Day, ForecastBundle, ForecastSeries, Location, RatedRecord,
    WeatherRecord,
};
pub use planner::{build_days, possible_walk_hours};
pub use scoring::{IdealTemp, ScoreBreakdown};
pub use weather::WeatherClient;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WalkcastError>;

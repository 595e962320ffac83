//! Data models for the walkcast library
//!
//! This module contains the core domain models organized by concern:
//! - Location: Geographic coordinates and metadata
//! - Series: Columnar multi-cadence forecast data as delivered by the provider
//! - Record: Per-timestamp weather rows and their rated wrapper
//! - Day: Calendar-day aggregate of rated records

pub mod day;
pub mod location;
pub mod record;
pub mod series;

// Re-export all public types for convenient access
pub use day::Day;
pub use location::Location;
pub use record::{DailySummary, ForecastBundle, RatedRecord, WeatherRecord};
pub use series::{DailySeries, ForecastSeries};

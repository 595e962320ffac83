//! Calendar-day aggregate of rated forecast records

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;

use crate::models::record::{DailySummary, RatedRecord, WeatherRecord};
use crate::scoring::IdealTemp;

/// One calendar day (UTC) with its daily summary and the rated fine-grained
/// records that fall on it.
///
/// Identity is the UTC (day, month, year) of the summary's timestamp. Each
/// cadence is attached exactly once; the day is logically immutable after
/// that.
#[derive(Debug, Clone, Serialize)]
pub struct Day {
    /// UTC day of month (1-31)
    pub date: u32,
    /// UTC month (1-12)
    pub month: u32,
    /// UTC year
    pub year: i32,
    /// The daily-cadence summary row this day was built from
    pub summary: DailySummary,
    /// Rated hourly records on this day, in forecast order
    pub hourly: Vec<RatedRecord>,
    /// Rated 15-minute records on this day, in forecast order
    pub minutely_15: Vec<RatedRecord>,
    ideal_temp: IdealTemp,
}

impl Day {
    /// Create a day from its daily summary; no records attached yet.
    #[must_use]
    pub fn new(summary: DailySummary, ideal_temp: IdealTemp) -> Self {
        Self {
            date: summary.time.day(),
            month: summary.time.month(),
            year: summary.time.year(),
            summary,
            hourly: Vec::new(),
            minutely_15: Vec::new(),
            ideal_temp,
        }
    }

    /// Whether a timestamp falls on this day's UTC calendar date.
    #[must_use]
    pub fn covers(&self, time: DateTime<Utc>) -> bool {
        time.day() == self.date && time.month() == self.month && time.year() == self.year
    }

    /// Attach the hourly records that fall on this day, wrapping each as a
    /// [`RatedRecord`]. Input order is preserved.
    pub fn attach_hourly(&mut self, records: &[WeatherRecord]) {
        self.hourly = self.wrap_matching(records);
    }

    /// Attach the 15-minute records that fall on this day.
    pub fn attach_minutely_15(&mut self, records: &[WeatherRecord]) {
        self.minutely_15 = self.wrap_matching(records);
    }

    fn wrap_matching(&self, records: &[WeatherRecord]) -> Vec<RatedRecord> {
        records
            .iter()
            .filter(|record| self.covers(record.time))
            .map(|record| RatedRecord::new(record.clone(), self.ideal_temp))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn summary(year: i32, month: u32, day: u32) -> DailySummary {
        DailySummary {
            time: Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap(),
            temperature_2m_max: 75.0,
            sunrise: Utc.with_ymd_and_hms(year, month, day, 10, 30, 0).unwrap(),
            sunset: Utc.with_ymd_and_hms(year, month, day, 1, 55, 0).unwrap(),
            wind_direction_10m_dominant: 180.0,
        }
    }

    fn record_at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> WeatherRecord {
        WeatherRecord {
            time: Utc.with_ymd_and_hms(year, month, day, hour, minute, 0).unwrap(),
            temperature_2m: 68.0,
            relative_humidity_2m: 45.0,
            apparent_temperature: 69.0,
            precipitation_probability: 5.0,
            cloud_cover: 20.0,
            visibility: 50000.0,
            wind_speed_10m: 3.0,
            wind_gusts_10m: 7.0,
            uv_index: 2.0,
            is_day: true,
            us_aqi: None,
        }
    }

    #[test]
    fn test_day_identity_from_summary() {
        let day = Day::new(summary(2024, 6, 1), IdealTemp::default());
        assert_eq!((day.year, day.month, day.date), (2024, 6, 1));
    }

    #[test]
    fn test_attach_keeps_only_matching_date() {
        let records = vec![
            record_at(2024, 6, 1, 23, 45),
            record_at(2024, 6, 2, 0, 0),
            record_at(2024, 6, 1, 8, 0),
        ];

        let mut day = Day::new(summary(2024, 6, 1), IdealTemp::default());
        day.attach_hourly(&records);

        assert_eq!(day.hourly.len(), 2);
        for rated in &day.hourly {
            assert!(day.covers(rated.record().time));
        }
    }

    #[test]
    fn test_no_record_lands_on_two_days() {
        let records = vec![
            record_at(2024, 6, 1, 12, 0),
            record_at(2024, 6, 1, 23, 45),
            record_at(2024, 6, 2, 0, 15),
            record_at(2024, 6, 2, 9, 0),
        ];

        let mut first = Day::new(summary(2024, 6, 1), IdealTemp::default());
        let mut second = Day::new(summary(2024, 6, 2), IdealTemp::default());
        first.attach_minutely_15(&records);
        second.attach_minutely_15(&records);

        assert_eq!(first.minutely_15.len() + second.minutely_15.len(), records.len());
        for rated in &first.minutely_15 {
            assert!(!second.covers(rated.record().time));
        }
    }

    #[test]
    fn test_attach_preserves_input_order() {
        let records = vec![
            record_at(2024, 6, 1, 6, 0),
            record_at(2024, 6, 1, 7, 0),
            record_at(2024, 6, 1, 8, 0),
        ];

        let mut day = Day::new(summary(2024, 6, 1), IdealTemp::default());
        day.attach_hourly(&records);

        let times: Vec<_> = day.hourly.iter().map(|r| r.record().time).collect();
        assert_eq!(times, vec![records[0].time, records[1].time, records[2].time]);
    }

    #[test]
    fn test_month_and_year_must_match_too() {
        let mut day = Day::new(summary(2024, 6, 1), IdealTemp::default());
        day.attach_hourly(&[record_at(2024, 7, 1, 12, 0), record_at(2023, 6, 1, 12, 0)]);
        assert!(day.hourly.is_empty());
    }
}

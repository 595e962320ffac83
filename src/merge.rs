//! Air-quality series joined onto fine-grained forecast records
//!
//! Air quality arrives as a separate hourly series. Records match a sample on
//! UTC calendar date plus UTC hour, so several 15-minute records share the
//! sample of their containing hour.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::models::record::WeatherRecord;

/// One hourly air-quality sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AirQualitySample {
    /// Sample timestamp (UTC, hourly granularity)
    pub time: DateTime<Utc>,
    /// US air quality index
    pub us_aqi: f64,
}

type HourKey = (i32, u32, u32, u32);

fn hour_key(time: DateTime<Utc>) -> HourKey {
    (time.year(), time.month(), time.day(), time.hour())
}

/// Attach `us_aqi` to every record with a sample in the same UTC hour.
///
/// The first sample for an hour wins if the series repeats one. Records
/// without a matching hour keep `us_aqi` absent.
#[must_use]
pub fn merge_air_quality(
    records: Vec<WeatherRecord>,
    samples: &[AirQualitySample],
) -> Vec<WeatherRecord> {
    let mut by_hour: HashMap<HourKey, f64> = HashMap::with_capacity(samples.len());
    for sample in samples {
        by_hour.entry(hour_key(sample.time)).or_insert(sample.us_aqi);
    }

    records
        .into_iter()
        .map(|record| match by_hour.get(&hour_key(record.time)) {
            Some(&us_aqi) => record.with_us_aqi(us_aqi),
            None => record,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record_at(hour: u32, minute: u32) -> WeatherRecord {
        WeatherRecord {
            time: Utc.with_ymd_and_hms(2024, 6, 1, hour, minute, 0).unwrap(),
            temperature_2m: 70.0,
            relative_humidity_2m: 50.0,
            apparent_temperature: 71.0,
            precipitation_probability: 0.0,
            cloud_cover: 10.0,
            visibility: 50000.0,
            wind_speed_10m: 4.0,
            wind_gusts_10m: 8.0,
            uv_index: 5.0,
            is_day: true,
            us_aqi: None,
        }
    }

    fn sample_at(hour: u32, us_aqi: f64) -> AirQualitySample {
        AirQualitySample {
            time: Utc.with_ymd_and_hms(2024, 6, 1, hour, 0, 0).unwrap(),
            us_aqi,
        }
    }

    #[test]
    fn test_minute_offsets_share_the_hour_sample() {
        let records = vec![record_at(14, 0), record_at(14, 10), record_at(14, 45)];
        let merged = merge_air_quality(records, &[sample_at(14, 62.0)]);

        assert_eq!(merged.len(), 3);
        for record in &merged {
            assert_eq!(record.us_aqi, Some(62.0));
        }
    }

    #[test]
    fn test_unmatched_records_stay_absent() {
        let merged = merge_air_quality(vec![record_at(9, 0), record_at(14, 0)], &[sample_at(14, 40.0)]);

        assert_eq!(merged[0].us_aqi, None);
        assert_eq!(merged[1].us_aqi, Some(40.0));
    }

    #[test]
    fn test_first_sample_wins_on_duplicate_hours() {
        let samples = vec![sample_at(14, 55.0), sample_at(14, 99.0)];
        let merged = merge_air_quality(vec![record_at(14, 30)], &samples);

        assert_eq!(merged[0].us_aqi, Some(55.0));
    }

    #[test]
    fn test_match_requires_same_calendar_date() {
        let next_day = AirQualitySample {
            time: Utc.with_ymd_and_hms(2024, 6, 2, 14, 0, 0).unwrap(),
            us_aqi: 70.0,
        };
        let merged = merge_air_quality(vec![record_at(14, 0)], &[next_day]);

        assert_eq!(merged[0].us_aqi, None);
    }

    #[test]
    fn test_merge_preserves_record_order_and_fields() {
        let records = vec![record_at(8, 0), record_at(9, 0), record_at(10, 0)];
        let times: Vec<_> = records.iter().map(|r| r.time).collect();

        let merged = merge_air_quality(records, &[sample_at(9, 33.0)]);
        let merged_times: Vec<_> = merged.iter().map(|r| r.time).collect();

        assert_eq!(merged_times, times);
        assert_eq!(merged[1].temperature_2m, 70.0);
    }

    #[test]
    fn test_empty_sample_series_is_a_no_op() {
        let merged = merge_air_quality(vec![record_at(14, 0)], &[]);
        assert_eq!(merged[0].us_aqi, None);
    }
}

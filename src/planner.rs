//! Builds the per-day walking outlook from one provider round-trip

use anyhow::Result;
use tracing::debug;

use crate::merge::{AirQualitySample, merge_air_quality};
use crate::models::{Day, ForecastBundle, RatedRecord};
use crate::scoring::IdealTemp;

/// Bucket every fine-grained cadence of a forecast bundle into its UTC
/// calendar day.
///
/// Hourly and 15-minute records first gain `us_aqi` from the air-quality
/// series, then each daily summary becomes a [`Day`] holding the rated
/// records that fall on it. Day order follows the daily series.
pub fn build_days(
    bundle: ForecastBundle,
    air_quality: &[AirQualitySample],
    ideal_temp: IdealTemp,
) -> Result<Vec<Day>> {
    let hourly = merge_air_quality(bundle.hourly.into_records()?, air_quality);
    let minutely_15 = match bundle.minutely_15 {
        Some(series) => merge_air_quality(series.into_records()?, air_quality),
        None => Vec::new(),
    };
    let summaries = bundle.daily.into_summaries()?;

    debug!(
        "Bucketing {} hourly and {} 15-minute records into {} days",
        hourly.len(),
        minutely_15.len(),
        summaries.len()
    );

    let mut days = Vec::with_capacity(summaries.len());
    for summary in summaries {
        let mut day = Day::new(summary, ideal_temp);
        day.attach_hourly(&hourly);
        day.attach_minutely_15(&minutely_15);
        days.push(day);
    }
    Ok(days)
}

/// Daylight hours on days warm enough for a walk.
///
/// A day qualifies when its maximum temperature reaches
/// `min_daily_max_temp`; from qualifying days every hourly record with
/// daylight is kept, in forecast order.
#[must_use]
pub fn possible_walk_hours(days: &[Day], min_daily_max_temp: f64) -> Vec<&RatedRecord> {
    days.iter()
        .filter(|day| day.summary.temperature_2m_max >= min_daily_max_temp)
        .flat_map(|day| day.hourly.iter())
        .filter(|hour| hour.record().is_day)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    use crate::models::{DailySeries, ForecastSeries};

    fn fine_series(times: &[DateTime<Utc>]) -> ForecastSeries {
        let n = times.len();
        ForecastSeries {
            time: times.to_vec(),
            temperature_2m: vec![70.0; n],
            relative_humidity_2m: vec![50.0; n],
            apparent_temperature: vec![71.0; n],
            precipitation_probability: vec![10.0; n],
            cloud_cover: vec![20.0; n],
            visibility: vec![50000.0; n],
            wind_speed_10m: vec![4.0; n],
            wind_gusts_10m: vec![8.0; n],
            uv_index: vec![2.0; n],
            is_day: vec![1.0; n],
        }
    }

    fn daily_series(max_temps: &[(u32, f64)]) -> DailySeries {
        DailySeries {
            time: max_temps
                .iter()
                .map(|&(day, _)| Utc.with_ymd_and_hms(2024, 6, day, 0, 0, 0).unwrap())
                .collect(),
            temperature_2m_max: max_temps.iter().map(|&(_, t)| t).collect(),
            sunrise: max_temps
                .iter()
                .map(|&(day, _)| Utc.with_ymd_and_hms(2024, 6, day, 10, 30, 0).unwrap())
                .collect(),
            sunset: max_temps
                .iter()
                .map(|&(day, _)| Utc.with_ymd_and_hms(2024, 6, day, 1, 55, 0).unwrap())
                .collect(),
            wind_direction_10m_dominant: vec![200.0; max_temps.len()],
        }
    }

    fn bundle() -> ForecastBundle {
        ForecastBundle {
            current: None,
            minutely_15: Some(fine_series(&[
                Utc.with_ymd_and_hms(2024, 6, 1, 14, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2024, 6, 1, 14, 15, 0).unwrap(),
            ])),
            hourly: fine_series(&[
                Utc.with_ymd_and_hms(2024, 6, 1, 14, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2024, 6, 1, 15, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2024, 6, 2, 14, 0, 0).unwrap(),
            ]),
            daily: daily_series(&[(1, 75.0), (2, 48.0)]),
        }
    }

    #[test]
    fn test_build_days_buckets_every_cadence() {
        let samples = [AirQualitySample {
            time: Utc.with_ymd_and_hms(2024, 6, 1, 14, 0, 0).unwrap(),
            us_aqi: 52.0,
        }];

        let days = build_days(bundle(), &samples, IdealTemp::default()).unwrap();

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].hourly.len(), 2);
        assert_eq!(days[0].minutely_15.len(), 2);
        assert_eq!(days[1].hourly.len(), 1);
        assert!(days[1].minutely_15.is_empty());

        // Both 15-minute records share the 14:00 sample
        for rated in &days[0].minutely_15 {
            assert_eq!(rated.record().us_aqi, Some(52.0));
        }
        // The 15:00 hourly record has no matching sample
        assert_eq!(days[0].hourly[1].record().us_aqi, None);
    }

    #[test]
    fn test_build_days_without_minutely_cadence() {
        let mut input = bundle();
        input.minutely_15 = None;

        let days = build_days(input, &[], IdealTemp::default()).unwrap();
        assert!(days.iter().all(|day| day.minutely_15.is_empty()));
    }

    #[test]
    fn test_walk_hours_skip_cold_days() {
        let days = build_days(bundle(), &[], IdealTemp::default()).unwrap();

        // Day two tops out at 48 °F and drops out entirely
        let hours = possible_walk_hours(&days, 50.0);
        assert_eq!(hours.len(), 2);
        assert!(hours.iter().all(|hour| hour.record().time.date_naive()
            == Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap().date_naive()));
    }

    #[test]
    fn test_walk_hours_require_daylight() {
        let mut input = bundle();
        input.hourly.is_day[0] = 0.0;

        let days = build_days(input, &[], IdealTemp::default()).unwrap();
        let hours = possible_walk_hours(&days, 50.0);
        assert_eq!(hours.len(), 1);
    }

    #[test]
    fn test_shape_violation_propagates() {
        let mut input = bundle();
        input.hourly.uv_index.pop();

        assert!(build_days(input, &[], IdealTemp::default()).is_err());
    }
}

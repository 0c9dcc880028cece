//! Daily digest: one representative sample per calendar day.
//!
//! Dates are bucketed in UTC from each sample's epoch timestamp. The first
//! sample of each date (in input order) represents that date, so for a
//! chronological list this is the earliest reading of the day.

use chrono::NaiveDate;

use crate::types::ForecastSample;

/// Maximum number of days in a digest
pub const DIGEST_DAYS: usize = 5;

/// One digest entry: a date and the first sample recorded on it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DigestEntry<'a> {
    pub date: NaiveDate,
    pub sample: &'a ForecastSample,
}

/// Reduce a chronological sample list to at most [`DIGEST_DAYS`] entries,
/// one per distinct UTC date, in first-occurrence order.
///
/// Samples whose timestamp cannot be represented as a date are skipped.
pub fn daily_digest(samples: &[ForecastSample]) -> Vec<DigestEntry<'_>> {
    let mut dates: Vec<NaiveDate> = Vec::with_capacity(DIGEST_DAYS);
    for date in samples.iter().filter_map(ForecastSample::utc_date) {
        if !dates.contains(&date) {
            dates.push(date);
        }
    }

    dates
        .into_iter()
        .take(DIGEST_DAYS)
        .filter_map(|date| {
            samples
                .iter()
                .find(|s| s.utc_date() == Some(date))
                .map(|sample| DigestEntry { date, sample })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Condition, MainReadings, Wind};

    const DAY: i64 = 86_400;
    // 2024-03-01T00:00:00Z
    const START: i64 = 1_709_251_200;

    fn sample(dt: i64, temp: f64) -> ForecastSample {
        ForecastSample {
            dt,
            dt_txt: None,
            main: MainReadings {
                temp: Some(temp),
                ..Default::default()
            },
            weather: vec![Condition::default()],
            wind: Wind::default(),
            visibility: None,
        }
    }

    /// `count` samples at 3-hour steps starting from `start`.
    fn series(start: i64, count: usize) -> Vec<ForecastSample> {
        (0..count)
            .map(|i| sample(start + i as i64 * 3 * 3600, i as f64))
            .collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(daily_digest(&[]).is_empty());
    }

    #[test]
    fn test_forty_samples_from_midnight_cover_five_days() {
        let samples = series(START, 40);
        let digest = daily_digest(&samples);

        assert_eq!(digest.len(), 5);
        for (i, entry) in digest.iter().enumerate() {
            assert_eq!(entry.sample.dt, START + i as i64 * DAY);
        }
    }

    #[test]
    fn test_caps_at_five_days() {
        // Starting mid-afternoon, 40 samples touch six dates.
        let samples = series(START + 15 * 3600, 40);
        let digest = daily_digest(&samples);

        assert_eq!(digest.len(), DIGEST_DAYS);
        assert_eq!(digest[0].sample.dt, START + 15 * 3600);
        assert_eq!(digest[1].sample.dt, START + DAY);
    }

    #[test]
    fn test_fewer_dates_yield_fewer_entries() {
        let samples = series(START, 12);
        let digest = daily_digest(&samples);
        assert_eq!(digest.len(), 2);
    }

    #[test]
    fn test_first_sample_of_each_date_wins() {
        let samples = vec![
            sample(START + 3600, 1.0),
            sample(START + 7200, 2.0),
            sample(START + DAY + 60, 3.0),
            sample(START + DAY + 120, 4.0),
        ];
        let digest = daily_digest(&samples);

        assert_eq!(digest.len(), 2);
        assert_eq!(digest[0].sample.main.temp, Some(1.0));
        assert_eq!(digest[1].sample.main.temp, Some(3.0));
    }

    #[test]
    fn test_dates_are_strictly_increasing() {
        let samples = series(START + 21 * 3600, 40);
        let digest = daily_digest(&samples);

        for pair in digest.windows(2) {
            assert!(pair[0].date < pair[1].date);
        }
        for entry in &digest {
            assert_eq!(entry.sample.utc_date(), Some(entry.date));
        }
    }

    #[test]
    fn test_utc_midnight_boundary() {
        // 23:59:59 and 00:00:00 land on different dates.
        let samples = vec![sample(START - 1, 1.0), sample(START, 2.0)];
        let digest = daily_digest(&samples);

        assert_eq!(digest.len(), 2);
        assert_eq!(digest[0].date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(digest[1].date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn test_out_of_range_timestamps_are_skipped() {
        let samples = vec![sample(i64::MAX, 0.0), sample(START, 1.0)];
        let digest = daily_digest(&samples);

        assert_eq!(digest.len(), 1);
        assert_eq!(digest[0].sample.main.temp, Some(1.0));
    }

    #[test]
    fn test_digest_is_idempotent() {
        let samples = series(START + 5 * 3600, 40);
        assert_eq!(daily_digest(&samples), daily_digest(&samples));
    }
}

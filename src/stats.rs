use crate::models::{BandRecord, DailyPoint, Summary};
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

pub fn summarize(records: &[BandRecord]) -> Summary {
    if records.is_empty() {
        return Summary::default();
    }

    let days: BTreeSet<NaiveDate> = records.iter().map(BandRecord::date).collect();
    let total_steps = records
        .iter()
        .fold(0u64, |sum, record| sum.saturating_add(record.steps));
    let total_calories: f64 = records.iter().map(|record| record.calories).sum();
    let sleep_minutes = records
        .iter()
        .fold(0u64, |sum, record| sum.saturating_add(record.sleep_minutes));

    // Sleep averages over every record; only heart rate skips empty samples.
    let avg_sleep_minutes = sleep_minutes as f64 / records.len() as f64;

    Summary {
        days: days.len(),
        total_steps,
        avg_heart_rate: round_to(mean_heart_rate(records.iter().map(|r| r.heart_rate)), 1),
        total_calories: round_to(total_calories, 2),
        avg_sleep_hours: round_to(avg_sleep_minutes / 60.0, 2),
    }
}

/// One entry per calendar date that has data, ascending by date.
pub fn group_daily(records: &[BandRecord]) -> Vec<DailyPoint> {
    let mut buckets: BTreeMap<NaiveDate, DayBucket> = BTreeMap::new();
    for record in records {
        buckets.entry(record.date()).or_default().add(record);
    }

    buckets
        .into_iter()
        .map(|(date, bucket)| bucket.into_point(date))
        .collect()
}

#[derive(Debug, Default)]
struct DayBucket {
    steps: u64,
    calories: f64,
    sleep_minutes: u64,
    heart_rates: Vec<i64>,
}

impl DayBucket {
    fn add(&mut self, record: &BandRecord) {
        self.steps = self.steps.saturating_add(record.steps);
        self.calories += record.calories;
        self.sleep_minutes = self.sleep_minutes.saturating_add(record.sleep_minutes);
        if record.has_heart_rate() {
            self.heart_rates.push(record.heart_rate);
        }
    }

    fn into_point(self, date: NaiveDate) -> DailyPoint {
        DailyPoint {
            date: date_key(date),
            steps: self.steps,
            calories: round_to(self.calories, 2),
            avg_heart_rate: round_to(mean_heart_rate(self.heart_rates), 1),
            sleep_hours: round_to(self.sleep_minutes as f64 / 60.0, 2),
        }
    }
}

/// Mean of the positive samples, 0 when there are none.
fn mean_heart_rate(samples: impl IntoIterator<Item = i64>) -> f64 {
    let (sum, count) = samples
        .into_iter()
        .filter(|bpm| *bpm > 0)
        .fold((0i64, 0u32), |(sum, count), bpm| {
            (sum.saturating_add(bpm), count + 1)
        });

    if count == 0 {
        0.0
    } else {
        sum as f64 / f64::from(count)
    }
}

/// Half away from zero.
fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::load_band_csv;
    use chrono::NaiveDateTime;
    use std::path::Path;

    fn record(timestamp: &str, steps: u64, heart_rate: i64, calories: f64, sleep: u64) -> BandRecord {
        BandRecord {
            timestamp: NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S").unwrap(),
            steps,
            heart_rate,
            calories,
            sleep_minutes: sleep,
        }
    }

    fn sample() -> Vec<BandRecord> {
        load_band_csv(Path::new(env!("CARGO_MANIFEST_DIR")).join("data/sample_band_data.csv"))
            .expect("sample data loads")
    }

    #[test]
    fn summarize_empty_is_all_zero() {
        let summary = summarize(&[]);
        assert_eq!(summary, Summary::default());
        assert_eq!(summary.days, 0);
        assert_eq!(summary.avg_heart_rate, 0.0);
    }

    #[test]
    fn group_daily_empty_is_empty() {
        assert!(group_daily(&[]).is_empty());
    }

    #[test]
    fn summarize_sample_data() {
        let summary = summarize(&sample());
        assert_eq!(summary.days, 3);
        assert_eq!(summary.total_steps, 22700);
        assert_eq!(summary.avg_heart_rate, 85.0);
        assert_eq!(summary.total_calories, 1252.5);
        assert_eq!(summary.avg_sleep_hours, 3.07);
    }

    #[test]
    fn group_daily_sample_data() {
        let daily = group_daily(&sample());
        assert_eq!(daily.len(), 3);

        let dates: Vec<&str> = daily.iter().map(|day| day.date.as_str()).collect();
        assert_eq!(dates, vec!["2026-02-13", "2026-02-14", "2026-02-15"]);

        assert_eq!(daily[0].steps, 7300);
        assert_eq!(daily[0].calories, 436.5);
        assert_eq!(daily[0].avg_heart_rate, 85.0);
        assert_eq!(daily[0].sleep_hours, 7.0);

        assert_eq!(daily[1].steps, 7400);
        assert_eq!(daily[1].calories, 390.5);
        assert_eq!(daily[1].avg_heart_rate, 70.0);
        assert_eq!(daily[1].sleep_hours, 6.5);

        assert_eq!(daily[2].steps, 8000);
        assert_eq!(daily[2].avg_heart_rate, 92.5);
        assert_eq!(daily[2].sleep_hours, 8.0);
    }

    #[test]
    fn sentinel_heart_rate_is_excluded_but_other_fields_count() {
        let records = vec![
            record("2026-03-01T08:00:00", 1000, 0, 50.0, 60),
            record("2026-03-01T09:00:00", 500, -1, 25.0, 0),
            record("2026-03-02T09:00:00", 200, 80, 10.0, 0),
        ];

        let summary = summarize(&records);
        assert_eq!(summary.total_steps, 1700);
        assert_eq!(summary.total_calories, 85.0);
        assert_eq!(summary.avg_heart_rate, 80.0);
        // 60 minutes over three records
        assert_eq!(summary.avg_sleep_hours, 0.33);

        let daily = group_daily(&records);
        assert_eq!(daily[0].steps, 1500);
        assert_eq!(daily[0].calories, 75.0);
        assert_eq!(daily[0].avg_heart_rate, 0.0);
        assert_eq!(daily[0].sleep_hours, 1.0);
    }

    #[test]
    fn no_heart_rate_samples_yields_zero() {
        let records = vec![record("2026-03-01T08:00:00", 10, 0, 1.0, 0)];
        assert_eq!(summarize(&records).avg_heart_rate, 0.0);
    }

    #[test]
    fn heart_rate_average_rounds_to_one_decimal() {
        let records = vec![
            record("2026-03-01T08:00:00", 0, 70, 0.0, 0),
            record("2026-03-01T09:00:00", 0, 71, 0.0, 0),
            record("2026-03-01T10:00:00", 0, 71, 0.0, 0),
        ];
        assert_eq!(summarize(&records).avg_heart_rate, 70.7);
        assert_eq!(group_daily(&records)[0].avg_heart_rate, 70.7);
    }

    #[test]
    fn days_split_at_midnight_and_gaps_are_not_filled() {
        let records = vec![
            record("2026-03-01T23:59:59", 10, 60, 1.0, 0),
            record("2026-03-02T00:00:00", 20, 60, 1.0, 0),
            record("2026-03-05T12:00:00", 30, 60, 1.0, 0),
        ];
        let daily = group_daily(&records);
        let dates: Vec<&str> = daily.iter().map(|day| day.date.as_str()).collect();
        assert_eq!(dates, vec!["2026-03-01", "2026-03-02", "2026-03-05"]);
        assert_eq!(summarize(&records).days, 3);
    }

    #[test]
    fn daily_steps_add_up_to_total() {
        let records = sample();
        let per_day: u64 = group_daily(&records).iter().map(|day| day.steps).sum();
        assert_eq!(per_day, summarize(&records).total_steps);
    }

    #[test]
    fn aggregation_ignores_input_order() {
        let records = sample();
        let mut reversed = records.clone();
        reversed.reverse();
        let mut rotated = records.clone();
        rotated.rotate_left(3);

        for shuffled in [&reversed, &rotated] {
            assert_eq!(summarize(shuffled), summarize(&records));
            assert_eq!(group_daily(shuffled), group_daily(&records));
        }
    }

    #[test]
    fn aggregation_is_repeatable() {
        let records = sample();
        assert_eq!(summarize(&records), summarize(&records));
        assert_eq!(group_daily(&records), group_daily(&records));
    }
}

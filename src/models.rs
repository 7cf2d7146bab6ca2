use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One observation exported by the band.
#[derive(Debug, Clone, PartialEq)]
pub struct BandRecord {
    pub timestamp: NaiveDateTime,
    pub steps: u64,
    /// Beats per minute. Zero or negative means the band took no sample.
    pub heart_rate: i64,
    pub calories: f64,
    pub sleep_minutes: u64,
}

impl BandRecord {
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    pub fn has_heart_rate(&self) -> bool {
        self.heart_rate > 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Summary {
    pub days: usize,
    pub total_steps: u64,
    pub avg_heart_rate: f64,
    pub total_calories: f64,
    pub avg_sleep_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPoint {
    pub date: String,
    pub steps: u64,
    pub calories: f64,
    pub avg_heart_rate: f64,
    pub sleep_hours: f64,
}

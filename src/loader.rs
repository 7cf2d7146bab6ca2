//! Reads band exports into chronologically ordered [`BandRecord`]s.
//!
//! Numeric cells are coerced leniently: anything that does not parse becomes
//! zero and the row is kept. The timestamp is the sort and grouping key, so it
//! is parsed strictly and a bad value fails the whole load.

use crate::errors::{FieldError, LoadError};
use crate::models::BandRecord;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::{fs::File, io::Read, path::Path};
use tracing::debug;

/// Coerces a cell, falling back to a default instead of failing.
pub type LenientParser<T> = fn(Option<&str>) -> T;

/// Coerces a cell or rejects it.
pub type StrictParser<T> = fn(Option<&str>) -> Result<T, FieldError>;

const TIMESTAMP: StrictParser<NaiveDateTime> = strict_timestamp;
const COUNT: LenientParser<u64> = lenient_count;
const INTEGER: LenientParser<i64> = lenient_int;
const REAL: LenientParser<f64> = lenient_real;

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%dT%H:%M:%S%.f%:z"];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

pub fn load_band_csv(path: impl AsRef<Path>) -> Result<Vec<BandRecord>, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let records = parse_band_csv(file)?;
    debug!(path = %path.display(), count = records.len(), "loaded band records");
    Ok(records)
}

pub fn parse_band_csv<R: Read>(reader: R) -> Result<Vec<BandRecord>, LoadError> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(reader);
    let columns = Columns::resolve(reader.headers()?);

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result?;
        records.push(columns.to_record(&row)?);
    }

    records.sort_by_key(|record| record.timestamp);
    Ok(records)
}

/// Whole-number cell that cannot be negative, e.g. `"120.0"` -> 120.
pub fn lenient_count(value: Option<&str>) -> u64 {
    match parse_finite(value).map(f64::trunc) {
        Some(number) if number >= 0.0 => number as u64,
        _ => 0,
    }
}

pub fn lenient_int(value: Option<&str>) -> i64 {
    parse_finite(value).map_or(0, |number| number.trunc() as i64)
}

pub fn lenient_real(value: Option<&str>) -> f64 {
    parse_finite(value)
        .filter(|number| *number >= 0.0)
        .unwrap_or(0.0)
}

/// ISO-8601 date-time, optionally with an offset, or a bare date at midnight.
///
/// Offsets are dropped after parsing: the record keeps the wall-clock time it
/// was written with.
pub fn strict_timestamp(value: Option<&str>) -> Result<NaiveDateTime, FieldError> {
    let raw = value.ok_or(FieldError::Missing)?;

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.naive_local());
    }
    for format in OFFSET_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(raw, format) {
            return Ok(parsed.naive_local());
        }
    }
    for format in NAIVE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(parsed);
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN))
        .map_err(|_| FieldError::Invalid(raw.to_string()))
}

fn parse_finite(value: Option<&str>) -> Option<f64> {
    value?
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}

/// Header positions, looked up by name so column order does not matter.
#[derive(Debug, Default)]
struct Columns {
    timestamp: Option<usize>,
    steps: Option<usize>,
    heart_rate: Option<usize>,
    calories: Option<usize>,
    sleep_minutes: Option<usize>,
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Self {
        let find = |name: &str| headers.iter().position(|header| header == name);
        Self {
            timestamp: find("timestamp"),
            steps: find("steps"),
            heart_rate: find("heart_rate"),
            calories: find("calories"),
            sleep_minutes: find("sleep_minutes"),
        }
    }

    fn to_record(&self, row: &StringRecord) -> Result<BandRecord, LoadError> {
        let line = row.position().map_or(0, |position| position.line());
        let timestamp = TIMESTAMP(cell(row, self.timestamp))
            .map_err(|source| LoadError::Timestamp { line, source })?;

        Ok(BandRecord {
            timestamp,
            steps: COUNT(cell(row, self.steps)),
            heart_rate: INTEGER(cell(row, self.heart_rate)),
            calories: REAL(cell(row, self.calories)),
            sleep_minutes: COUNT(cell(row, self.sleep_minutes)),
        })
    }
}

fn cell(row: &StringRecord, index: Option<usize>) -> Option<&str> {
    index.and_then(|index| row.get(index))
}

//! Exchange-rate series loading
//!
//! Reads a CSV export with one row per day, a date column and a selling-rate
//! column, and returns the values in chronological order ready for the
//! forecasting models.

use crate::error::{ForecastError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use fts_math::SeriesStats;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Date formats tried in order when parsing the date column
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y", "%m/%d/%Y"];

/// Names of the columns to read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvColumns {
    /// Date column
    pub date: String,
    /// Value column
    pub value: String,
}

impl Default for CsvColumns {
    fn default() -> Self {
        Self {
            date: "Tanggal".to_string(),
            value: "Kurs Jual".to_string(),
        }
    }
}

impl CsvColumns {
    /// Read `value` against the `date` column
    pub fn new(date: &str, value: &str) -> Self {
        Self {
            date: date.to_string(),
            value: value.to_string(),
        }
    }
}

/// Chronologically ordered exchange-rate observations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSeries")]
pub struct ExchangeRateSeries {
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
}

/// Unchecked form of a series, validated through `ExchangeRateSeries::new`
#[derive(Deserialize)]
struct RawSeries {
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl TryFrom<RawSeries> for ExchangeRateSeries {
    type Error = ForecastError;

    fn try_from(raw: RawSeries) -> Result<Self> {
        Self::new(raw.dates, raw.values)
    }
}

impl ExchangeRateSeries {
    /// Create a series from dates and values, sorting it by date.
    ///
    /// The sort is stable, so rows sharing a date keep their input order.
    pub fn new(dates: Vec<NaiveDate>, values: Vec<f64>) -> Result<Self> {
        if dates.len() != values.len() {
            return Err(ForecastError::DataError(format!(
                "Dates length ({}) doesn't match values length ({})",
                dates.len(),
                values.len()
            )));
        }
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(ForecastError::InvalidInput(format!(
                "Non-finite value {} at index {}",
                values[index], index
            )));
        }

        let mut rows: Vec<(NaiveDate, f64)> = dates.into_iter().zip(values).collect();
        rows.sort_by_key(|(date, _)| *date);
        let (dates, values) = rows.into_iter().unzip();

        Ok(Self { dates, values })
    }

    /// Observation dates, ascending
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Observed values in date order
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of observations
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the series is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Minimum, maximum, range and suggested set count
    pub fn stats(&self) -> Result<SeriesStats> {
        Ok(SeriesStats::from_series(&self.values)?)
    }
}

/// Data loader for exchange-rate CSV files
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load a series from a CSV file using the default column names
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<ExchangeRateSeries> {
        Self::from_csv_with_columns(path, &CsvColumns::default())
    }

    /// Load a series from a CSV file using custom column names
    pub fn from_csv_with_columns<P: AsRef<Path>>(
        path: P,
        columns: &CsvColumns,
    ) -> Result<ExchangeRateSeries> {
        let file = File::open(path)?;
        Self::from_reader(file, columns)
    }

    /// Load a series from any CSV source
    pub fn from_reader<R: Read>(reader: R, columns: &CsvColumns) -> Result<ExchangeRateSeries> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let date_index = Self::find_column(&headers, &columns.date)?;
        let value_index = Self::find_column(&headers, &columns.value)?;

        let mut dates = Vec::new();
        let mut values = Vec::new();
        for (row, record) in csv_reader.records().enumerate() {
            let record = record?;
            // Row numbers are reported 1-based after the header line.
            let line = row + 2;

            let raw_date = record.get(date_index).unwrap_or_default();
            let date = parse_date(raw_date).ok_or_else(|| {
                ForecastError::ParseError(format!(
                    "Invalid date '{}' in column '{}' at line {}",
                    raw_date, columns.date, line
                ))
            })?;

            let raw_value = record.get(value_index).unwrap_or_default();
            let value = parse_value(raw_value).ok_or_else(|| {
                ForecastError::ParseError(format!(
                    "Invalid value '{}' in column '{}' at line {}",
                    raw_value, columns.value, line
                ))
            })?;

            dates.push(date);
            values.push(value);
        }

        if values.is_empty() {
            return Err(ForecastError::DataError(
                "No rows found in data".to_string(),
            ));
        }

        log::debug!("Loaded {} observations from CSV", values.len());
        ExchangeRateSeries::new(dates, values)
    }

    /// Locate a column by exact name, falling back to a case-insensitive match
    fn find_column(headers: &csv::StringRecord, name: &str) -> Result<usize> {
        let normalize = |s: &str| s.trim().trim_start_matches('\u{feff}').to_string();

        headers
            .iter()
            .position(|h| normalize(h) == name)
            .or_else(|| {
                headers
                    .iter()
                    .position(|h| normalize(h).eq_ignore_ascii_case(name))
            })
            .ok_or_else(|| {
                ForecastError::DataError(format!("Column '{}' not found in data", name))
            })
    }
}

/// Parse a calendar date in one of the supported formats
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

fn parse_value(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

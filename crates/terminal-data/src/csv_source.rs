//! Offline CSV bar source.

use chrono::{NaiveDate, NaiveDateTime};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use terminal_core::error::DataError;
use terminal_core::types::{Bar, BarSeries, Period};

/// CSV record format.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(alias = "Date", alias = "date", alias = "timestamp", alias = "Timestamp")]
    date: String,
    #[serde(alias = "Open", alias = "open")]
    open: f64,
    #[serde(alias = "High", alias = "high")]
    high: f64,
    #[serde(alias = "Low", alias = "low")]
    low: f64,
    #[serde(alias = "Close", alias = "close")]
    close: f64,
    #[serde(alias = "Volume", alias = "volume", default)]
    volume: f64,
}

/// Loads exported OHLCV files for the offline scan path.
pub struct CsvBarSource {
    path: PathBuf,
}

impl CsvBarSource {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, DataError> {
        let path = path.into();
        if !path.exists() {
            return Err(DataError::NoData);
        }
        Ok(Self { path })
    }

    /// Load every bar in the file, sorted ascending by timestamp.
    pub fn load(&self, symbol: &str, period: Period) -> Result<BarSeries, DataError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)
            .map_err(|e| DataError::Parse(e.to_string()))?;

        let mut bars = Vec::new();
        for result in reader.deserialize() {
            let record: CsvRecord = result.map_err(|e| DataError::Parse(e.to_string()))?;
            let timestamp = parse_timestamp(&record.date)?;
            bars.push(Bar::new(
                timestamp,
                record.open,
                record.high,
                record.low,
                record.close,
                record.volume,
            ));
        }
        bars.sort_by_key(|b| b.timestamp);

        let mut series = BarSeries::new(symbol.to_string(), period);
        series.extend(bars);
        Ok(series)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Parse the date column, which may be a date, a datetime, or a raw Unix
/// stamp in seconds or milliseconds.
fn parse_timestamp(date_str: &str) -> Result<i64, DataError> {
    let formats = ["%Y-%m-%d", "%Y-%m-%d %H:%M:%S", "%Y/%m/%d", "%m/%d/%Y"];

    for format in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, format) {
            return Ok(dt.and_utc().timestamp_millis());
        }
        if let Ok(d) = NaiveDate::parse_from_str(date_str, format) {
            let dt = d.and_hms_opt(0, 0, 0).expect("midnight is valid");
            return Ok(dt.and_utc().timestamp_millis());
        }
    }

    if let Ok(ts) = date_str.parse::<i64>() {
        return Ok(super::bars::normalize_timestamp(ts));
    }

    Err(DataError::Parse(format!("could not parse date: {date_str}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_csv(contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("bars-{}.csv", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert!(parse_timestamp("2024-01-15").is_ok());
        assert!(parse_timestamp("2024-01-15 10:30:00").is_ok());
        assert_eq!(
            parse_timestamp("1705312800").unwrap(),
            parse_timestamp("1705312800000").unwrap()
        );
        assert!(parse_timestamp("not-a-date").is_err());
    }

    #[test]
    fn test_load_sorts_and_maps_columns() {
        let path = temp_csv(
            "date,open,high,low,close,volume\n\
             2024-01-16,10.1,10.4,10.0,10.3,2000\n\
             2024-01-15,10.0,10.2,9.9,10.1,1000\n",
        );

        let source = CsvBarSource::new(&path).unwrap();
        let series = source.load("600000", Period::Daily).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(series.len(), 2);
        assert_eq!(series.closes(), vec![10.1, 10.3]);
        assert_eq!(series.symbol, "600000");
    }

    #[test]
    fn test_missing_file_is_no_data() {
        let missing = std::env::temp_dir().join("definitely-not-here.csv");
        assert!(matches!(
            CsvBarSource::new(missing),
            Err(DataError::NoData)
        ));
    }
}

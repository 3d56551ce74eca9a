//! CSV series source.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use verdict_core::error::DataError;
use verdict_core::traits::SeriesSource;
use verdict_core::types::{Lookback, PricePoint, Series};

/// CSV record format.
///
/// Empty or unparseable cells become `None` and are stored as NaN.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(alias = "Date", alias = "date", alias = "timestamp", alias = "Timestamp")]
    date: String,
    #[serde(alias = "Open", alias = "open", default, deserialize_with = "csv::invalid_option")]
    open: Option<f64>,
    #[serde(alias = "High", alias = "high", default, deserialize_with = "csv::invalid_option")]
    high: Option<f64>,
    #[serde(alias = "Low", alias = "low", default, deserialize_with = "csv::invalid_option")]
    low: Option<f64>,
    #[serde(alias = "Close", alias = "close", default, deserialize_with = "csv::invalid_option")]
    close: Option<f64>,
    /// Used only when the file has no usable `Close` cell
    #[serde(
        rename = "Adj Close",
        alias = "adj_close",
        alias = "adjclose",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    adj_close: Option<f64>,
    #[serde(alias = "Volume", alias = "volume", default, deserialize_with = "csv::invalid_option")]
    volume: Option<f64>,
}

impl CsvRecord {
    fn into_point(self) -> Result<PricePoint, DataError> {
        let date = parse_date(&self.date)?;
        Ok(PricePoint::new(
            date,
            self.open.unwrap_or(f64::NAN),
            self.high.unwrap_or(f64::NAN),
            self.low.unwrap_or(f64::NAN),
            self.close.or(self.adj_close).unwrap_or(f64::NAN),
            self.volume.unwrap_or(f64::NAN),
        ))
    }
}

/// Daily price history read from CSV files.
///
/// The root is either a single file (every symbol maps to it) or a
/// directory holding one file per symbol.
#[derive(Debug, Clone)]
pub struct CsvSeriesSource {
    root: PathBuf,
    lookback: Lookback,
}

impl CsvSeriesSource {
    /// Create a new CSV series source.
    pub fn new(root: impl AsRef<Path>) -> Result<Self, DataError> {
        let root = root.as_ref();
        if !root.exists() {
            return Err(DataError::NoDataAvailable);
        }
        Ok(Self {
            root: root.to_path_buf(),
            lookback: Lookback::Max,
        })
    }

    /// Trim every loaded series to a trailing window.
    pub fn with_lookback(mut self, lookback: Lookback) -> Self {
        self.lookback = lookback;
        self
    }

    pub fn lookback(&self) -> Lookback {
        self.lookback
    }

    /// File that holds the given symbol's history.
    pub fn path_for(&self, symbol: &str) -> Result<PathBuf, DataError> {
        if self.root.is_dir() {
            resolve_symbol_file(&self.root, symbol)
                .ok_or_else(|| DataError::SymbolNotFound(symbol.to_string()))
        } else {
            Ok(self.root.clone())
        }
    }

    /// Load a series synchronously.
    pub fn load_blocking(&self, symbol: &str) -> Result<Series, DataError> {
        let path = self.path_for(symbol)?;
        debug!(symbol, path = %path.display(), "loading csv");

        let reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(&path)
            .map_err(|e| DataError::ParseError(format!("{}: {}", path.display(), e)))?;

        let series = read_series(symbol, reader)?;
        if self.lookback == Lookback::Max {
            return Ok(series);
        }

        let trimmed = series.trailing(self.lookback);
        debug!(
            symbol,
            period = %self.lookback,
            kept = trimmed.len(),
            dropped = series.len() - trimmed.len(),
            "trimmed history"
        );
        Ok(trimmed)
    }
}

#[async_trait]
impl SeriesSource for CsvSeriesSource {
    async fn load_series(&self, symbol: &str) -> Result<Series, DataError> {
        self.load_blocking(symbol)
    }

    fn name(&self) -> &str {
        "csv"
    }
}

/// Look for `{symbol}.csv` or `{symbol}_daily.csv` (either case) in a directory.
pub fn resolve_symbol_file(dir: &Path, symbol: &str) -> Option<PathBuf> {
    let lower = symbol.to_lowercase();
    let candidates = [
        dir.join(format!("{}.csv", symbol)),
        dir.join(format!("{}.csv", lower)),
        dir.join(format!("{}_daily.csv", symbol)),
        dir.join(format!("{}_daily.csv", lower)),
    ];

    candidates.into_iter().find(|p| p.is_file())
}

/// Parse CSV rows into a validated series.
///
/// Rows are sorted by date; two rows on the same date are rejected.
pub fn read_series<R: Read>(
    symbol: &str,
    mut reader: csv::Reader<R>,
) -> Result<Series, DataError> {
    let mut points = Vec::new();

    for result in reader.deserialize() {
        let record: CsvRecord = result.map_err(|e| DataError::ParseError(e.to_string()))?;
        points.push(record.into_point()?);
    }

    if points.is_empty() {
        return Err(DataError::NoDataAvailable);
    }

    points.sort_by_key(|p| p.date);

    if let Some(pair) = points.windows(2).find(|w| w[0].date == w[1].date) {
        return Err(DataError::DuplicateDate(pair[1].date));
    }

    let series = Series::new(symbol, points)?;

    let malformed = series.malformed_count();
    if malformed > 0 {
        warn!(symbol, malformed, "rows with missing or invalid values");
    }

    Ok(series)
}

/// Parse the date formats commonly found in exported price files.
fn parse_date(date_str: &str) -> Result<NaiveDate, DataError> {
    let formats = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y"];

    for format in formats {
        if let Ok(d) = NaiveDate::parse_from_str(date_str, format) {
            return Ok(d);
        }
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, format) {
            return Ok(dt.date());
        }
    }

    // Unix timestamp, milliseconds if more than 10 digits
    if let Ok(ts) = date_str.parse::<i64>() {
        let millis = if ts > 10_000_000_000 { ts } else { ts * 1000 };
        if let Some(dt) = DateTime::from_timestamp_millis(millis) {
            return Ok(dt.date_naive());
        }
    }

    Err(DataError::ParseError(format!(
        "Could not parse date: {}",
        date_str
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(data: &str) -> Result<Series, DataError> {
        let reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(data.as_bytes());
        read_series("TEST", reader)
    }

    #[test]
    fn test_parse_date() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();

        assert_eq!(parse_date("2024-01-15").unwrap(), expected);
        assert_eq!(parse_date("2024-01-15 10:30:00").unwrap(), expected);
        assert_eq!(parse_date("01/15/2024").unwrap(), expected);
        assert_eq!(parse_date("1705312800000").unwrap(), expected); // Unix ms
        assert_eq!(parse_date("1705312800").unwrap(), expected); // Unix sec
        assert!(parse_date("yesterday").is_err());
    }

    #[test]
    fn test_rows_sorted_by_date() {
        let series = parse(
            "Date,Open,High,Low,Close,Volume\n\
             2024-01-03,11,12,10,11.5,900\n\
             2024-01-02,10,11,9,10.5,1000\n",
        )
        .unwrap();

        assert_eq!(series.len(), 2);
        assert_eq!(series.points()[0].close, 10.5);
        assert_eq!(series.last().close, 11.5);
    }

    #[test]
    fn test_duplicate_dates_rejected() {
        let result = parse(
            "date,open,high,low,close,volume\n\
             2024-01-02,10,11,9,10.5,1000\n\
             2024-01-02,10,11,9,10.7,1000\n",
        );

        assert!(matches!(result, Err(DataError::DuplicateDate(_))));
    }

    #[test]
    fn test_missing_close_becomes_nan() {
        let series = parse(
            "Date,Open,High,Low,Close,Volume\n\
             2024-01-02,10,11,9,10.5,1000\n\
             2024-01-03,10,11,9,,1000\n\
             2024-01-04,10,11,9,n/a,1000\n",
        )
        .unwrap();

        assert_eq!(series.len(), 3);
        assert!(series.points()[1].close.is_nan());
        assert!(series.points()[2].close.is_nan());
        assert_eq!(series.malformed_count(), 2);
    }

    #[test]
    fn test_yahoo_export_with_adjusted_close() {
        let series = parse(
            "Date,Open,High,Low,Close,Adj Close,Volume\n\
             2024-01-02,10,11,9,10.5,10.4,1000\n\
             2024-01-03,10.5,11.2,10.1,11.0,,1200\n",
        )
        .unwrap();

        assert_eq!(series.len(), 2);
        assert_eq!(series.points()[0].close, 10.5);
        assert_eq!(series.last().close, 11.0);
        assert_eq!(series.malformed_count(), 0);
    }

    #[test]
    fn test_adjusted_close_fills_missing_close() {
        let series = parse(
            "Date,Open,High,Low,Adj Close,Volume\n\
             2024-01-02,10,11,9,10.4,1000\n",
        )
        .unwrap();

        assert_eq!(series.last().close, 10.4);
    }

    #[test]
    fn test_missing_volume_is_malformed() {
        let series = parse(
            "Date,Open,High,Low,Close,Volume\n\
             2024-01-02,10,11,9,10.5,\n\
             2024-01-03,10,11,9,10.7,900\n",
        )
        .unwrap();

        assert!(series.points()[0].volume.is_nan());
        assert!(series.points()[0].has_valid_close());
        assert_eq!(series.malformed_count(), 1);
    }

    #[test]
    fn test_empty_file_has_no_data() {
        assert!(matches!(
            parse("Date,Open,High,Low,Close,Volume\n"),
            Err(DataError::NoDataAvailable)
        ));
    }

    #[tokio::test]
    async fn test_directory_lookup() {
        let dir = std::env::temp_dir().join(format!("verdict-csv-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("acme_daily.csv"),
            "Date,Open,High,Low,Close,Volume\n2024-01-02,1,1,1,1,1\n",
        )
        .unwrap();

        let source = CsvSeriesSource::new(&dir).unwrap();
        let series = source.load_series("ACME").await.unwrap();
        assert_eq!(series.symbol(), "ACME");
        assert_eq!(series.len(), 1);

        assert!(matches!(
            source.load_series("NONE").await,
            Err(DataError::SymbolNotFound(_))
        ));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_lookback_trims_loaded_series() {
        let path = std::env::temp_dir().join(format!("verdict-lookback-{}.csv", std::process::id()));
        std::fs::write(
            &path,
            "Date,Open,High,Low,Close,Volume\n\
             2023-12-29,1,1,1,1,1\n\
             2024-01-02,2,2,2,2,1\n\
             2024-02-15,3,3,3,3,1\n\
             2024-03-01,4,4,4,4,1\n",
        )
        .unwrap();

        let full = CsvSeriesSource::new(&path).unwrap();
        assert_eq!(full.lookback(), Lookback::Max);
        assert_eq!(full.load_blocking("X").unwrap().len(), 4);

        let ytd = full.clone().with_lookback(Lookback::YearToDate);
        let series = ytd.load_blocking("X").unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.points()[0].close, 2.0);

        let month = full.with_lookback(Lookback::Months(1));
        let series = month.load_blocking("X").unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.last().close, 4.0);

        std::fs::remove_file(&path).unwrap();
    }
}

//! CSV file history adapter.
//!
//! One file per symbol and interval: `<dir>/<SYMBOL>_<interval>.csv` with
//! header `timestamp,open,high,low,close,volume`. Timestamps are either
//! `YYYY-MM-DD HH:MM:SS` or a bare `YYYY-MM-DD` date.

use crate::domain::error::SigtraderError;
use crate::domain::ohlcv::{Interval, OhlcvBar, normalize_bars};
use crate::ports::history_port::HistoryPort;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::debug;

const PROVIDER: &str = "csv history";

pub struct CsvHistoryAdapter {
    base_path: PathBuf,
}

impl CsvHistoryAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str, interval: Interval) -> PathBuf {
        self.base_path.join(format!("{}_{}.csv", symbol, interval))
    }
}

pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

fn field<T: FromStr>(
    record: &csv::StringRecord,
    index: usize,
    name: &str,
    symbol: &str,
) -> Result<T, SigtraderError>
where
    T::Err: std::fmt::Display,
{
    record
        .get(index)
        .ok_or_else(|| SigtraderError::malformed(PROVIDER, symbol, format!("missing {} column", name)))?
        .trim()
        .parse()
        .map_err(|e| SigtraderError::malformed(PROVIDER, symbol, format!("invalid {} value: {}", name, e)))
}

impl HistoryPort for CsvHistoryAdapter {
    fn fetch_bars(
        &self,
        symbol: &str,
        interval: Interval,
        lookback_days: u32,
    ) -> Result<Vec<OhlcvBar>, SigtraderError> {
        let path = self.csv_path(symbol, interval);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no history file");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(SigtraderError::unavailable(
                    PROVIDER,
                    symbol,
                    format!("failed to read {}: {}", path.display(), e),
                ));
            }
        };

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| {
                SigtraderError::malformed(PROVIDER, symbol, format!("CSV parse error: {}", e))
            })?;

            let raw_ts = record.get(0).unwrap_or_default();
            let timestamp = parse_timestamp(raw_ts).ok_or_else(|| {
                SigtraderError::malformed(PROVIDER, symbol, format!("invalid timestamp '{}'", raw_ts))
            })?;

            bars.push(OhlcvBar {
                symbol: symbol.to_string(),
                timestamp,
                open: field(&record, 1, "open", symbol)?,
                high: field(&record, 2, "high", symbol)?,
                low: field(&record, 3, "low", symbol)?,
                close: field(&record, 4, "close", symbol)?,
                volume: field(&record, 5, "volume", symbol)?,
            });
        }

        let mut bars = normalize_bars(bars);
        if let Some(newest) = bars.last().map(|b| b.timestamp) {
            let cutoff = newest - Duration::days(lookback_days as i64);
            bars.retain(|b| b.timestamp >= cutoff);
        }

        debug!(%symbol, %interval, bars = bars.len(), "loaded history");
        Ok(bars)
    }
}

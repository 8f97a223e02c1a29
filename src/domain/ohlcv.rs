//! OHLCV bar representation and ingestion normalization.

use chrono::NaiveDateTime;
use std::fmt;

/// Bar granularity requested from a history provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interval {
    Minute,
    Day,
}

impl Interval {
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::Minute => "minute",
            Interval::Day => "day",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OhlcvBar {
    pub symbol: String,
    pub timestamp: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

/// Sort bars ascending by timestamp and drop duplicate timestamps.
///
/// When two bars share a timestamp the later one in the input wins, so a
/// freshly fetched bar replaces a stale cached one.
pub fn normalize_bars(mut bars: Vec<OhlcvBar>) -> Vec<OhlcvBar> {
    // stable sort keeps input order among equal timestamps
    bars.sort_by_key(|b| b.timestamp);

    let mut out: Vec<OhlcvBar> = Vec::with_capacity(bars.len());
    for bar in bars {
        match out.last_mut() {
            Some(last) if last.timestamp == bar.timestamp => *last = bar,
            _ => out.push(bar),
        }
    }
    out
}

#![allow(dead_code)]

use chrono::{Duration, NaiveDate, NaiveDateTime};
use sigtrader::domain::error::SigtraderError;
pub use sigtrader::domain::ohlcv::{Interval, OhlcvBar};
use sigtrader::ports::history_port::HistoryPort;
use sigtrader::ports::quote_port::{Quote, QuotePort};
use std::cell::RefCell;
use std::collections::HashMap;

/// Bars keyed by (symbol, interval); errors keyed by symbol.
pub struct MockHistoryPort {
    pub data: HashMap<(String, Interval), Vec<OhlcvBar>>,
    pub errors: HashMap<String, String>,
    pub requests: RefCell<Vec<(String, Interval, u32)>>,
}

impl MockHistoryPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn with_bars(mut self, symbol: &str, interval: Interval, bars: Vec<OhlcvBar>) -> Self {
        self.data.insert((symbol.to_string(), interval), bars);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }

    pub fn requested(&self, symbol: &str) -> bool {
        self.requests.borrow().iter().any(|(s, _, _)| s == symbol)
    }
}

impl HistoryPort for MockHistoryPort {
    fn fetch_bars(
        &self,
        symbol: &str,
        interval: Interval,
        lookback_days: u32,
    ) -> Result<Vec<OhlcvBar>, SigtraderError> {
        self.requests
            .borrow_mut()
            .push((symbol.to_string(), interval, lookback_days));
        if let Some(reason) = self.errors.get(symbol) {
            return Err(SigtraderError::unavailable("mock history", symbol, reason.clone()));
        }
        Ok(self
            .data
            .get(&(symbol.to_string(), interval))
            .cloned()
            .unwrap_or_default())
    }
}

pub struct MockQuotePort {
    pub prices: HashMap<String, f64>,
    pub errors: HashMap<String, String>,
    pub requests: RefCell<Vec<String>>,
}

impl MockQuotePort {
    pub fn new() -> Self {
        Self {
            prices: HashMap::new(),
            errors: HashMap::new(),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn with_price(mut self, symbol: &str, price: f64) -> Self {
        self.prices.insert(symbol.to_string(), price);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }

    pub fn requested(&self, symbol: &str) -> bool {
        self.requests.borrow().iter().any(|s| s == symbol)
    }
}

impl QuotePort for MockQuotePort {
    fn fetch_quote(&self, symbol: &str) -> Result<Quote, SigtraderError> {
        self.requests.borrow_mut().push(symbol.to_string());
        if let Some(reason) = self.errors.get(symbol) {
            return Err(SigtraderError::unavailable("mock quote", symbol, reason.clone()));
        }
        let price = self.prices.get(symbol).copied().ok_or_else(|| SigtraderError::NotFound {
            what: format!("quote for {}", symbol),
        })?;
        Ok(Quote {
            symbol: symbol.to_string(),
            last_price: price,
            open: price,
            high: price,
            low: price,
            volume: 1000,
            timestamp: start_of_day(),
        })
    }
}

pub fn start_of_day() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 2)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap()
}

pub fn make_bar(symbol: &str, timestamp: NaiveDateTime, close: f64) -> OhlcvBar {
    OhlcvBar {
        symbol: symbol.to_string(),
        timestamp,
        open: close,
        high: close + 1.0,
        low: close - 1.0,
        close,
        volume: 1000,
    }
}

pub fn daily_bars(symbol: &str, closes: &[f64]) -> Vec<OhlcvBar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| make_bar(symbol, start_of_day() + Duration::days(i as i64), c))
        .collect()
}

pub fn minute_bars(symbol: &str, closes: &[f64]) -> Vec<OhlcvBar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| make_bar(symbol, start_of_day() + Duration::minutes(i as i64), c))
        .collect()
}

/// Steady decline: RSI 0 and close under its SMA, so the rule says Buy.
pub fn falling_closes(n: usize) -> Vec<f64> {
    (0..n).map(|i| 200.0 - i as f64).collect()
}

/// Steady rally: RSI 100 and close over its SMA, so the rule says Sell.
pub fn rising_closes(n: usize) -> Vec<f64> {
    (0..n).map(|i| 100.0 + i as f64).collect()
}

pub fn flat_closes(n: usize) -> Vec<f64> {
    vec![100.0; n]
}

/// Daily moves alternating +r, -r, starting from 100.
pub fn alternating_closes(n: usize, r: f64) -> Vec<f64> {
    let mut closes = Vec::with_capacity(n);
    let mut price = 100.0;
    for i in 0..n {
        closes.push(price);
        price *= if i % 2 == 0 { 1.0 + r } else { 1.0 - r };
    }
    closes
}

//! Real-time quote provider port.

use crate::domain::error::SigtraderError;
use chrono::NaiveDateTime;

/// Point-in-time price snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub symbol: String,
    pub last_price: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub volume: i64,
    pub timestamp: NaiveDateTime,
}

pub trait QuotePort {
    fn fetch_quote(&self, symbol: &str) -> Result<Quote, SigtraderError>;
}

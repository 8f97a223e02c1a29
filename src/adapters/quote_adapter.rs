//! Offline quote adapter backed by the newest daily bar of a history port.

use crate::domain::error::SigtraderError;
use crate::domain::ohlcv::Interval;
use crate::ports::history_port::HistoryPort;
use crate::ports::quote_port::{Quote, QuotePort};

const PROVIDER: &str = "last-close quote";
const QUOTE_LOOKBACK_DAYS: u32 = 7;

pub struct LastCloseQuoteAdapter<H> {
    history: H,
}

impl<H: HistoryPort> LastCloseQuoteAdapter<H> {
    pub fn new(history: H) -> Self {
        Self { history }
    }
}

impl<H: HistoryPort> QuotePort for LastCloseQuoteAdapter<H> {
    fn fetch_quote(&self, symbol: &str) -> Result<Quote, SigtraderError> {
        let bars = self
            .history
            .fetch_bars(symbol, Interval::Day, QUOTE_LOOKBACK_DAYS)
            .map_err(|e| SigtraderError::unavailable(PROVIDER, symbol, e.to_string()))?;

        let bar = bars
            .last()
            .ok_or_else(|| SigtraderError::unavailable(PROVIDER, symbol, "no recent bar"))?;

        Ok(Quote {
            symbol: symbol.to_string(),
            last_price: bar.close,
            open: bar.open,
            high: bar.high,
            low: bar.low,
            volume: bar.volume,
            timestamp: bar.timestamp,
        })
    }
}

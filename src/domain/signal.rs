//! Buy/Sell/Hold recommendation from the latest RSI and SMA reading.
//!
//! Priority order, no hysteresis:
//! 1. RSI < 30 and close < SMA  -> Buy (oversold below trend)
//! 2. RSI > 70 and close > SMA  -> Sell (overbought above trend)
//! 3. otherwise                 -> Hold

use crate::domain::error::SigtraderError;
use crate::domain::indicator::IndicatorSet;
use crate::domain::ohlcv::OhlcvBar;
use std::fmt;

pub const RSI_OVERSOLD: f64 = 30.0;
pub const RSI_OVERBOUGHT: f64 = 70.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

impl Signal {
    /// Vectorized encoding: 1 = Buy, -1 = Sell, 0 = Hold.
    pub fn direction(&self) -> i8 {
        match self {
            Signal::Buy => 1,
            Signal::Sell => -1,
            Signal::Hold => 0,
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Buy => write!(f, "Buy"),
            Signal::Sell => write!(f, "Sell"),
            Signal::Hold => write!(f, "Hold"),
        }
    }
}

/// `None` when either indicator is still warming up.
pub fn recommend(close: f64, rsi: Option<f64>, sma: Option<f64>) -> Option<Signal> {
    let (rsi, sma) = (rsi?, sma?);
    let signal = if rsi < RSI_OVERSOLD && close < sma {
        Signal::Buy
    } else if rsi > RSI_OVERBOUGHT && close > sma {
        Signal::Sell
    } else {
        Signal::Hold
    };
    Some(signal)
}

/// Signal for bar `index`, `None` while warming up or out of range.
pub fn signal_at(bars: &[OhlcvBar], indicators: &IndicatorSet, index: usize) -> Option<Signal> {
    let bar = bars.get(index)?;
    recommend(bar.close, indicators.rsi.get(index), indicators.sma.get(index))
}

/// Recommendation for the newest bar.
pub fn latest_signal(bars: &[OhlcvBar], indicators: &IndicatorSet) -> Result<Signal, SigtraderError> {
    let insufficient = || SigtraderError::InsufficientData {
        symbol: bars.first().map(|b| b.symbol.clone()).unwrap_or_default(),
        bars: bars.len(),
        minimum: indicators.minimum_bars(),
    };

    match bars.len().checked_sub(1) {
        Some(last) => signal_at(bars, indicators, last).ok_or_else(insufficient),
        None => Err(insufficient()),
    }
}

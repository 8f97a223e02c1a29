//! Next-trade selection over a candidate universe.
//!
//! Each candidate not already held is scored from its latest intraday
//! signal (Buy +1, Sell -1, Hold 0). Positive scores get a risk-level bonus.
//! The first candidate with the strictly highest positive score is bought.

use crate::domain::indicator::{DEFAULT_RSI_PERIOD, DEFAULT_SMA_PERIOD, compute_indicators};
use crate::domain::ohlcv::Interval;
use crate::domain::portfolio::Portfolio;
use crate::domain::risk::RiskLevel;
use crate::domain::signal::{Signal, latest_signal};
use crate::ports::history_port::HistoryPort;
use std::fmt;
use tracing::{debug, warn};

pub const DEFAULT_UNIVERSE: [&str; 5] = ["AAPL", "MSFT", "GOOGL", "AMZN", "TSLA"];
pub const DEFAULT_LOW_BONUS: i32 = 1;
pub const DEFAULT_HIGH_BONUS: i32 = 2;
pub const DEFAULT_CANDIDATE_LOOKBACK_DAYS: u32 = 30;
pub const DEFAULT_TRADE_QUANTITY: u32 = 1;

#[derive(Debug, Clone, PartialEq)]
pub struct SelectorConfig {
    pub universe: Vec<String>,
    pub low_bonus: i32,
    pub high_bonus: i32,
    pub lookback_days: u32,
    pub quantity: u32,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        SelectorConfig {
            universe: DEFAULT_UNIVERSE.iter().map(|s| s.to_string()).collect(),
            low_bonus: DEFAULT_LOW_BONUS,
            high_bonus: DEFAULT_HIGH_BONUS,
            lookback_days: DEFAULT_CANDIDATE_LOOKBACK_DAYS,
            quantity: DEFAULT_TRADE_QUANTITY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeAction {
    Buy,
    Hold,
}

impl fmt::Display for TradeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeAction::Buy => write!(f, "Buy"),
            TradeAction::Hold => write!(f, "Hold"),
        }
    }
}

/// A symbol-less suggestion is always Hold with quantity 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeSuggestion {
    pub symbol: Option<String>,
    pub action: TradeAction,
    pub quantity: u32,
}

impl TradeSuggestion {
    pub fn hold() -> Self {
        TradeSuggestion {
            symbol: None,
            action: TradeAction::Hold,
            quantity: 0,
        }
    }

    pub fn buy(symbol: impl Into<String>, quantity: u32) -> Self {
        TradeSuggestion {
            symbol: Some(symbol.into()),
            action: TradeAction::Buy,
            quantity,
        }
    }
}

impl fmt::Display for TradeSuggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.symbol {
            Some(symbol) => write!(f, "{} {} x{}", self.action, symbol, self.quantity),
            None => write!(f, "{}", self.action),
        }
    }
}

pub fn base_score(signal: Signal) -> i32 {
    signal.direction() as i32
}

/// Bonus applies only to positive base scores.
pub fn score_candidate(signal: Signal, risk_level: RiskLevel, config: &SelectorConfig) -> i32 {
    let base = base_score(signal);
    if base <= 0 {
        return base;
    }
    let bonus = match risk_level {
        RiskLevel::Low => config.low_bonus,
        RiskLevel::Moderate => 0,
        RiskLevel::High => config.high_bonus,
    };
    base.saturating_add(bonus)
}

pub fn suggest_next_trade(
    portfolio: &Portfolio,
    risk_level: RiskLevel,
    config: &SelectorConfig,
    history: &dyn HistoryPort,
) -> TradeSuggestion {
    let mut best: Option<(&str, i32)> = None;

    for symbol in config.universe.iter().filter(|s| !portfolio.has_position(s.as_str())) {
        let bars = match history.fetch_bars(symbol, Interval::Minute, config.lookback_days) {
            Ok(bars) => bars,
            Err(e) => {
                warn!(%symbol, error = %e, "skipping candidate");
                continue;
            }
        };
        if bars.is_empty() {
            debug!(%symbol, "skipping candidate with no bars");
            continue;
        }

        let indicators = compute_indicators(&bars, DEFAULT_RSI_PERIOD, DEFAULT_SMA_PERIOD);
        let signal = latest_signal(&bars, &indicators).unwrap_or_else(|e| {
            debug!(%symbol, error = %e, "no recommendation, treating as hold");
            Signal::Hold
        });
        let score = score_candidate(signal, risk_level, config);
        debug!(%symbol, %signal, score, "scored candidate");

        if best.is_none_or(|(_, top)| score > top) {
            best = Some((symbol.as_str(), score));
        }
    }

    match best {
        Some((symbol, score)) if score > 0 => TradeSuggestion::buy(symbol, config.quantity),
        _ => TradeSuggestion::hold(),
    }
}

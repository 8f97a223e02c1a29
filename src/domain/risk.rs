//! Portfolio risk scoring.
//!
//! Per held symbol: ~90 daily bars give simple daily returns, annualized as
//! volatility = std * sqrt(252) and return = mean * 252. The risk score is the
//! mean volatility across symbols with data, times 100.

use crate::domain::ohlcv::{Interval, OhlcvBar};
use crate::domain::portfolio::{Portfolio, Position};
use crate::domain::selector::{SelectorConfig, TradeSuggestion, suggest_next_trade};
use crate::ports::history_port::HistoryPort;
use crate::ports::quote_port::QuotePort;
use std::fmt;
use tracing::{debug, info, warn};

const TRADING_DAYS_PER_YEAR: f64 = 252.0;

pub const DEFAULT_HISTORY_DAYS: u32 = 90;
pub const LOW_RISK_CEILING: f64 = 20.0;
pub const MODERATE_RISK_CEILING: f64 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    /// Canonical advisory copy for each class.
    pub fn suggestion(&self) -> &'static str {
        match self {
            RiskLevel::Low => "stable stocks or bonds",
            RiskLevel::Moderate => "balanced mix of growth and stable stocks",
            RiskLevel::High => "aggressive growth stocks or options",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Moderate => write!(f, "Moderate"),
            RiskLevel::High => write!(f, "High"),
        }
    }
}

pub fn classify_risk(risk_score: f64) -> RiskLevel {
    if risk_score < LOW_RISK_CEILING {
        RiskLevel::Low
    } else if risk_score < MODERATE_RISK_CEILING {
        RiskLevel::Moderate
    } else {
        RiskLevel::High
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RiskConfig {
    pub history_days: u32,
}

impl Default for RiskConfig {
    fn default() -> Self {
        RiskConfig {
            history_days: DEFAULT_HISTORY_DAYS,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SymbolRisk {
    pub symbol: String,
    pub value: f64,
    /// `None` with fewer than two daily returns.
    pub volatility: Option<f64>,
    pub annual_return: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RiskProfile {
    pub portfolio_value: f64,
    pub risk_score: f64,
    pub risk_level: RiskLevel,
    pub suggestion: String,
    pub avg_volatility: f64,
    pub avg_return: f64,
    pub holdings: Vec<SymbolRisk>,
    pub next_trade: TradeSuggestion,
}

/// close[t] / close[t-1] - 1, skipping moves off a non-positive close.
pub fn daily_returns(bars: &[OhlcvBar]) -> Vec<f64> {
    bars.windows(2)
        .filter(|w| w[0].close > 0.0)
        .map(|w| w[1].close / w[0].close - 1.0)
        .filter(|r| r.is_finite())
        .collect()
}

/// (annualized volatility, annualized return); sample standard deviation.
pub fn annualized_stats(returns: &[f64]) -> Option<(f64, f64)> {
    if returns.len() < 2 {
        return None;
    }
    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1.0);
    Some((
        variance.sqrt() * TRADING_DAYS_PER_YEAR.sqrt(),
        mean * TRADING_DAYS_PER_YEAR,
    ))
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Value and statistics for one holding; `None` when it must be skipped.
fn assess_symbol(
    position: &Position,
    quotes: &dyn QuotePort,
    history: &dyn HistoryPort,
    config: &RiskConfig,
) -> Option<SymbolRisk> {
    let symbol = position.symbol.as_str();
    let bars = match history.fetch_bars(symbol, Interval::Day, config.history_days) {
        Ok(bars) => bars,
        Err(e) => {
            warn!(%symbol, error = %e, "skipping holding");
            return None;
        }
    };
    if bars.is_empty() {
        warn!(%symbol, "skipping holding with no history");
        return None;
    }

    let quote = match quotes.fetch_quote(symbol) {
        Ok(q) if q.last_price.is_finite() && q.last_price >= 0.0 => q,
        Ok(q) => {
            warn!(%symbol, price = q.last_price, "skipping holding with malformed quote");
            return None;
        }
        Err(e) => {
            warn!(%symbol, error = %e, "skipping holding");
            return None;
        }
    };

    let stats = annualized_stats(&daily_returns(&bars));
    let value = position.market_value(quote.last_price);
    debug!(%symbol, value, ?stats, "assessed holding");

    Some(SymbolRisk {
        symbol: symbol.to_string(),
        value,
        volatility: stats.map(|(v, _)| v),
        annual_return: stats.map(|(_, r)| r),
    })
}

pub fn analyze_portfolio(
    portfolio: &Portfolio,
    quotes: &dyn QuotePort,
    history: &dyn HistoryPort,
    risk_config: &RiskConfig,
    selector_config: &SelectorConfig,
) -> RiskProfile {
    let holdings: Vec<SymbolRisk> = portfolio
        .iter()
        .filter_map(|p| assess_symbol(p, quotes, history, risk_config))
        .collect();

    // f64's Sum starts from -0.0
    let portfolio_value = holdings.iter().fold(0.0, |acc, h| acc + h.value);
    let volatilities: Vec<f64> = holdings.iter().filter_map(|h| h.volatility).collect();
    let returns: Vec<f64> = holdings.iter().filter_map(|h| h.annual_return).collect();

    let avg_volatility = mean(&volatilities);
    let avg_return = mean(&returns);
    let risk_score = avg_volatility * 100.0;
    let risk_level = classify_risk(risk_score);

    info!(
        holdings = holdings.len(),
        portfolio_value,
        risk_score,
        %risk_level,
        "portfolio analyzed"
    );

    let next_trade = suggest_next_trade(portfolio, risk_level, selector_config, history);

    RiskProfile {
        portfolio_value,
        risk_score,
        risk_level,
        suggestion: risk_level.suggestion().to_string(),
        avg_volatility,
        avg_return,
        holdings,
        next_trade,
    }
}

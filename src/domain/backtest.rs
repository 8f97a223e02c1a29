//! Signal-replay backtest with slippage and per-bar transaction cost.
//!
//! Per bar `t`:
//! - signal[t]    = signal rule on bar t (1 Buy, -1 Sell, 0 Hold or warming up)
//! - position[t]  = last non-zero signal seen up to and including t
//! - entry[t]     = open[t+1] * (1 + slippage), undefined on the final bar
//! - return[t]    = position[t-1] * (close[t] / entry[t] - 1) - transaction_cost
//!
//! Cost is charged on every bar with a held position, not only on position
//! changes. This overstates costs on long holds; it is kept so historical
//! results stay reproducible.

use crate::domain::indicator::{DEFAULT_RSI_PERIOD, DEFAULT_SMA_PERIOD, compute_indicators};
use crate::domain::ohlcv::OhlcvBar;
use crate::domain::signal::signal_at;
use tracing::debug;

pub const DEFAULT_SLIPPAGE: f64 = 0.001;
pub const DEFAULT_TRANSACTION_COST: f64 = 0.0001;

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestConfig {
    pub slippage: f64,
    pub transaction_cost: f64,
    pub rsi_period: usize,
    pub sma_period: usize,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        BacktestConfig {
            slippage: DEFAULT_SLIPPAGE,
            transaction_cost: DEFAULT_TRANSACTION_COST,
            rsi_period: DEFAULT_RSI_PERIOD,
            sma_period: DEFAULT_SMA_PERIOD,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BacktestResult {
    pub cumulative_return: f64,
    /// Bars that contributed a defined strategy return.
    pub exposed_bars: usize,
    /// Aligned with the input bars; `None` where no return is defined.
    pub strategy_returns: Vec<Option<f64>>,
}

/// Carry the last non-zero direction forward; `None` until the first one.
pub fn forward_fill_positions(directions: &[i8]) -> Vec<Option<i8>> {
    let mut held: Option<i8> = None;
    directions
        .iter()
        .map(|&d| {
            if d != 0 {
                held = Some(d);
            }
            held
        })
        .collect()
}

/// Per-bar strategy returns for an already-derived direction column.
pub fn strategy_returns(
    bars: &[OhlcvBar],
    directions: &[i8],
    slippage: f64,
    transaction_cost: f64,
) -> Vec<Option<f64>> {
    let positions = forward_fill_positions(directions);

    (0..bars.len())
        .map(|t| {
            let prev_position = t.checked_sub(1).and_then(|p| positions.get(p).copied().flatten())?;
            let entry = bars.get(t + 1).map(|next| next.open * (1.0 + slippage))?;
            if entry <= 0.0 {
                return None;
            }
            Some(prev_position as f64 * (bars[t].close / entry - 1.0) - transaction_cost)
        })
        .collect()
}

pub fn cumulative_return(returns: &[Option<f64>]) -> f64 {
    returns.iter().flatten().fold(1.0, |acc, r| acc * (1.0 + r)) - 1.0
}

pub fn run_backtest(bars: &[OhlcvBar], config: &BacktestConfig) -> BacktestResult {
    if bars.is_empty() {
        return BacktestResult::default();
    }

    let indicators = compute_indicators(bars, config.rsi_period, config.sma_period);
    let directions: Vec<i8> = (0..bars.len())
        .map(|i| signal_at(bars, &indicators, i).map_or(0, |s| s.direction()))
        .collect();

    let returns = strategy_returns(bars, &directions, config.slippage, config.transaction_cost);
    let exposed_bars = returns.iter().filter(|r| r.is_some()).count();
    let cumulative = cumulative_return(&returns);

    debug!(
        bars = bars.len(),
        exposed_bars,
        cumulative_return = cumulative,
        "backtest complete"
    );

    BacktestResult {
        cumulative_return: cumulative,
        exposed_bars,
        strategy_returns: returns,
    }
}

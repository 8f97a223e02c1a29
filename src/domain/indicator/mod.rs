//! Technical indicators over a bar series.
//!
//! - `IndicatorPoint`: one aligned value, flagged invalid during warm-up
//! - `IndicatorType`: indicator identity + period
//! - `IndicatorSeries`: one indicator column aligned to the input bars
//! - `IndicatorSet`: the RSI and SMA columns the signal rule consumes

pub mod rsi;
pub mod sma;

use crate::domain::ohlcv::OhlcvBar;
use chrono::NaiveDateTime;
use std::fmt;

pub const DEFAULT_RSI_PERIOD: usize = 14;
pub const DEFAULT_SMA_PERIOD: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorPoint {
    pub timestamp: NaiveDateTime,
    pub valid: bool,
    pub value: f64,
}

impl IndicatorPoint {
    pub fn warmup(timestamp: NaiveDateTime) -> Self {
        IndicatorPoint {
            timestamp,
            valid: false,
            value: 0.0,
        }
    }

    pub fn get(&self) -> Option<f64> {
        self.valid.then_some(self.value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Rsi(usize),
    Sma(usize),
}

impl IndicatorType {
    pub fn period(&self) -> usize {
        match self {
            IndicatorType::Rsi(period) | IndicatorType::Sma(period) => *period,
        }
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Rsi(period) => write!(f, "RSI({})", period),
            IndicatorType::Sma(period) => write!(f, "SMA({})", period),
        }
    }
}

#[derive(Debug, Clone)]
pub struct IndicatorSeries {
    pub indicator_type: IndicatorType,
    pub values: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).and_then(IndicatorPoint::get)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn valid_count(&self) -> usize {
        self.values.iter().filter(|p| p.valid).count()
    }
}

/// RSI and SMA columns, both aligned index-for-index with the source bars.
#[derive(Debug, Clone)]
pub struct IndicatorSet {
    pub rsi: IndicatorSeries,
    pub sma: IndicatorSeries,
}

impl IndicatorSet {
    pub fn len(&self) -> usize {
        self.rsi.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rsi.is_empty()
    }

    /// Bars needed before both columns carry a value.
    pub fn minimum_bars(&self) -> usize {
        self.sma
            .indicator_type
            .period()
            .max(self.rsi.indicator_type.period() + 1)
    }
}

/// Pure transform: never fails, short input just yields invalid columns.
pub fn compute_indicators(bars: &[OhlcvBar], rsi_period: usize, sma_period: usize) -> IndicatorSet {
    IndicatorSet {
        rsi: rsi::calculate_rsi(bars, rsi_period),
        sma: sma::calculate_sma(bars, sma_period),
    }
}

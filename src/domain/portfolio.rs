//! Caller-supplied holdings.

use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub symbol: String,
    pub shares: u64,
}

impl Position {
    pub fn new(symbol: impl Into<String>, shares: u64) -> Self {
        Position {
            symbol: symbol.into(),
            shares,
        }
    }

    pub fn market_value(&self, price: f64) -> f64 {
        self.shares as f64 * price
    }
}

/// Symbol -> position. Ordered so every walk over holdings is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Portfolio {
    pub positions: BTreeMap<String, Position>,
}

impl Portfolio {
    pub fn new() -> Self {
        Portfolio::default()
    }

    pub fn from_positions(positions: impl IntoIterator<Item = Position>) -> Self {
        let mut portfolio = Portfolio::new();
        for position in positions {
            portfolio.add_position(position);
        }
        portfolio
    }

    /// Replaces any existing position for the same symbol.
    pub fn add_position(&mut self, position: Position) {
        self.positions.insert(position.symbol.clone(), position);
    }

    pub fn get_position(&self, symbol: &str) -> Option<&Position> {
        self.positions.get(symbol)
    }

    pub fn has_position(&self, symbol: &str) -> bool {
        self.positions.contains_key(symbol)
    }

    pub fn position_count(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Position> {
        self.positions.values()
    }
}

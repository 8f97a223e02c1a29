//! Symbol list and holdings parsing for configuration values.

use crate::domain::portfolio::{Portfolio, Position};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UniverseError {
    #[error("empty token in symbol list")]
    EmptyToken,

    #[error("duplicate symbol: {0}")]
    DuplicateSymbol(String),

    #[error("invalid holding '{0}', expected SYMBOL:SHARES")]
    InvalidHolding(String),
}

/// Comma-separated symbols, trimmed and upper-cased, order preserved.
pub fn parse_symbols(input: &str) -> Result<Vec<String>, UniverseError> {
    let mut symbols = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(UniverseError::EmptyToken);
        }
        let symbol = trimmed.to_uppercase();
        if !seen.insert(symbol.clone()) {
            return Err(UniverseError::DuplicateSymbol(symbol));
        }
        symbols.push(symbol);
    }

    Ok(symbols)
}

/// `AAPL:10, MSFT:5` -> portfolio. Blank input is an empty portfolio.
pub fn parse_holdings(input: &str) -> Result<Portfolio, UniverseError> {
    let mut portfolio = Portfolio::new();
    if input.trim().is_empty() {
        return Ok(portfolio);
    }

    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(UniverseError::EmptyToken);
        }
        let (symbol, shares) = trimmed
            .split_once(':')
            .ok_or_else(|| UniverseError::InvalidHolding(trimmed.to_string()))?;
        let symbol = symbol.trim().to_uppercase();
        let shares: u64 = shares
            .trim()
            .parse()
            .map_err(|_| UniverseError::InvalidHolding(trimmed.to_string()))?;
        if symbol.is_empty() {
            return Err(UniverseError::InvalidHolding(trimmed.to_string()));
        }
        if portfolio.has_position(&symbol) {
            return Err(UniverseError::DuplicateSymbol(symbol));
        }
        portfolio.add_position(Position::new(symbol, shares));
    }

    Ok(portfolio)
}

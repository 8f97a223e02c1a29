//! Configuration validation.
//!
//! Validates all config fields before any provider is touched. Missing keys
//! fall back to defaults and are not errors.

use crate::domain::error::SigtraderError;
use crate::domain::universe::{parse_holdings, parse_symbols};
use crate::ports::config_port::ConfigPort;

pub fn validate_config(config: &dyn ConfigPort) -> Result<(), SigtraderError> {
    validate_positive_int(config, "data", "lookback_days")?;
    validate_backtest_config(config)?;
    validate_portfolio_config(config)?;
    validate_selector_config(config)?;
    Ok(())
}

pub fn validate_backtest_config(config: &dyn ConfigPort) -> Result<(), SigtraderError> {
    validate_non_negative(config, "backtest", "slippage")?;
    validate_non_negative(config, "backtest", "transaction_cost")?;
    validate_positive_int(config, "backtest", "rsi_period")?;
    validate_positive_int(config, "backtest", "sma_period")?;
    Ok(())
}

pub fn validate_portfolio_config(config: &dyn ConfigPort) -> Result<(), SigtraderError> {
    if let Some(holdings) = config.get_string("portfolio", "holdings") {
        parse_holdings(&holdings)
            .map_err(|e| SigtraderError::config_invalid("portfolio", "holdings", e.to_string()))?;
    }
    validate_positive_int(config, "portfolio", "history_days")?;
    Ok(())
}

pub fn validate_selector_config(config: &dyn ConfigPort) -> Result<(), SigtraderError> {
    if let Some(universe) = config.get_string("selector", "universe") {
        parse_symbols(&universe)
            .map_err(|e| SigtraderError::config_invalid("selector", "universe", e.to_string()))?;
    }
    validate_bonus(config, "low_bonus")?;
    validate_bonus(config, "high_bonus")?;
    validate_positive_int(config, "selector", "lookback_days")?;
    validate_positive_int(config, "selector", "quantity")?;
    Ok(())
}

fn validate_non_negative(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<(), SigtraderError> {
    let value = config.get_double(section, key, 0.0);
    if value < 0.0 || !value.is_finite() {
        return Err(SigtraderError::config_invalid(
            section,
            key,
            format!("{} must be non-negative", key),
        ));
    }
    Ok(())
}

fn validate_positive_int(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<(), SigtraderError> {
    // absent keys read as 1 so only explicit values are checked
    let value = config.get_int(section, key, 1);
    if value <= 0 || value > u32::MAX as i64 {
        return Err(SigtraderError::config_invalid(
            section,
            key,
            format!("{} must be a positive integer", key),
        ));
    }
    Ok(())
}

fn validate_bonus(config: &dyn ConfigPort, key: &str) -> Result<(), SigtraderError> {
    let value = config.get_int("selector", key, 0);
    if value < 0 || value > i32::MAX as i64 {
        return Err(SigtraderError::config_invalid(
            "selector",
            key,
            format!("{} must be between 0 and {}", key, i32::MAX),
        ));
    }
    Ok(())
}

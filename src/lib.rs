//! sigtrader: RSI/SMA signal recommendations, backtests, portfolio risk and
//! a small command shell.
//!
//! Hexagonal architecture: domain logic in [`domain`], port traits in [`ports`],
//! concrete implementations in [`adapters`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
pub mod logging;
pub mod shell;

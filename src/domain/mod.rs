//! Core domain types and logic.

pub mod ohlcv;
pub mod indicator;
pub mod signal;
pub mod backtest;
pub mod portfolio;
pub mod risk;
pub mod selector;
pub mod command;
pub mod universe;
pub mod config_validation;
pub mod error;

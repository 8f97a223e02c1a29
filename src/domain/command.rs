//! Transcribed voice command -> intent.
//!
//! Keyword checks run in order: "buy", "sell", "balance sheet". A trade
//! request is only actionable when it agrees with the latest recommendation.
//! Confirmation and execution belong to the caller.

use crate::domain::signal::Signal;
use std::fmt;

pub const DEFAULT_QUANTITY: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeSide {
    Buy,
    Sell,
}

impl TradeSide {
    fn matching_signal(&self) -> Signal {
        match self {
            TradeSide::Buy => Signal::Buy,
            TradeSide::Sell => Signal::Sell,
        }
    }
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeSide::Buy => write!(f, "buy"),
            TradeSide::Sell => write!(f, "sell"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuantityError {
    #[error("'{0}' is not a valid share quantity")]
    OutOfRange(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    RequestBuy { quantity: u32 },
    RequestSell { quantity: u32 },
    /// Trade keyword heard but the recommendation disagrees.
    Declined {
        side: TradeSide,
        recommendation: Option<Signal>,
    },
    /// Trade keyword heard with an integer that cannot be a share count.
    InvalidQuantity { side: TradeSide, token: String },
    RequestBalanceSheet,
    Unrecognized,
}

fn is_integer_token(token: &str) -> bool {
    let digits = token.strip_prefix(['-', '+']).unwrap_or(token);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// First whitespace token that is an integer, else 1.
///
/// Zero, negative or oversized integers are rejected rather than skipped.
pub fn extract_quantity(text: &str) -> Result<u32, QuantityError> {
    let Some(token) = text.split_whitespace().find(|t| is_integer_token(t)) else {
        return Ok(DEFAULT_QUANTITY);
    };
    token
        .parse::<u32>()
        .ok()
        .filter(|q| *q > 0)
        .ok_or_else(|| QuantityError::OutOfRange(token.to_string()))
}

fn trade_intent(side: TradeSide, text: &str, recommendation: Option<Signal>) -> Intent {
    if recommendation != Some(side.matching_signal()) {
        return Intent::Declined {
            side,
            recommendation,
        };
    }
    let quantity = match extract_quantity(text) {
        Ok(quantity) => quantity,
        Err(QuantityError::OutOfRange(token)) => return Intent::InvalidQuantity { side, token },
    };
    match side {
        TradeSide::Buy => Intent::RequestBuy { quantity },
        TradeSide::Sell => Intent::RequestSell { quantity },
    }
}

pub fn interpret(command_text: &str, recommendation: Option<Signal>) -> Intent {
    let text = command_text.to_lowercase();

    if text.contains("buy") {
        trade_intent(TradeSide::Buy, &text, recommendation)
    } else if text.contains("sell") {
        trade_intent(TradeSide::Sell, &text, recommendation)
    } else if text.contains("balance sheet") {
        Intent::RequestBalanceSheet
    } else {
        Intent::Unrecognized
    }
}

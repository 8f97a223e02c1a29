//! Interactive command loop over the transcriber and speaker ports.
//!
//! Trades are simulated: a confirmed request is recorded and announced,
//! never sent anywhere.

use crate::domain::command::{Intent, TradeSide, interpret};
use crate::domain::signal::Signal;
use crate::ports::document_port::{BalanceSheet, DocumentPort};
use crate::ports::speaker_port::SpeakerPort;
use crate::ports::transcriber_port::TranscriberPort;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatedOrder {
    pub side: TradeSide,
    pub symbol: String,
    pub quantity: u32,
}

pub struct Shell<'a> {
    pub symbol: String,
    pub recommendation: Option<Signal>,
    pub transcriber: &'a mut dyn TranscriberPort,
    pub speaker: &'a dyn SpeakerPort,
    pub documents: &'a dyn DocumentPort,
}

fn is_exit(text: &str) -> bool {
    matches!(text, "exit" | "quit" | "stop")
}

fn is_yes(text: &str) -> bool {
    matches!(text.trim().to_lowercase().as_str(), "y" | "yes")
}

pub fn render_balance_sheet(sheet: &BalanceSheet) -> String {
    let mut out = format!("Balance sheet for {}", sheet.symbol);
    if !sheet.periods.is_empty() {
        out.push_str(&format!(" ({})", sheet.periods.join(", ")));
    }
    for row in &sheet.rows {
        out.push_str(&format!("\n  {}: {}", row.label, row.values.join(", ")));
    }
    out
}

impl Shell<'_> {
    /// Runs until an exit word or the transcriber stops producing text.
    pub fn run(&mut self) -> Vec<SimulatedOrder> {
        let mut orders = Vec::new();
        let status = match self.recommendation {
            Some(signal) => format!("Current recommendation for {}: {}", self.symbol, signal),
            None => format!("No recommendation available for {}", self.symbol),
        };
        self.speaker.say(&status);

        loop {
            let text = match self.transcriber.listen_and_transcribe() {
                Ok(text) => text.to_lowercase(),
                Err(e) => {
                    info!(error = %e, "transcriber closed, leaving shell");
                    break;
                }
            };
            if text.is_empty() {
                continue;
            }
            if is_exit(&text) {
                self.speaker.say("Goodbye.");
                break;
            }

            let intent = interpret(&text, self.recommendation);
            debug!(%text, ?intent, "interpreted command");

            match intent {
                Intent::RequestBuy { quantity } => {
                    orders.extend(self.confirm_trade(TradeSide::Buy, quantity))
                }
                Intent::RequestSell { quantity } => {
                    orders.extend(self.confirm_trade(TradeSide::Sell, quantity))
                }
                Intent::Declined {
                    side,
                    recommendation,
                } => {
                    let current = recommendation.map_or("unavailable".to_string(), |s| s.to_string());
                    self.speaker.say(&format!(
                        "Not placing a {} order: current recommendation is {}.",
                        side, current
                    ));
                }
                Intent::InvalidQuantity { side, token } => {
                    self.speaker.say(&format!(
                        "Not placing a {} order: '{}' is not a valid share quantity.",
                        side, token
                    ));
                }
                Intent::RequestBalanceSheet => self.speak_balance_sheet(),
                Intent::Unrecognized => self.speaker.say("Sorry, I didn't understand that."),
            }
        }

        orders
    }

    fn confirm_trade(&mut self, side: TradeSide, quantity: u32) -> Option<SimulatedOrder> {
        self.speaker.say(&format!(
            "Confirm {} {} shares of {}? (y/n)",
            side, quantity, self.symbol
        ));

        let answer = match self.transcriber.listen_and_transcribe() {
            Ok(answer) => answer,
            Err(e) => {
                warn!(error = %e, "no confirmation received");
                return None;
            }
        };

        if !is_yes(&answer) {
            self.speaker.say("Order cancelled.");
            return None;
        }

        info!(%side, quantity, symbol = %self.symbol, "simulated order confirmed");
        self.speaker.say(&format!(
            "Simulated {} of {} shares of {} recorded.",
            side, quantity, self.symbol
        ));
        Some(SimulatedOrder {
            side,
            symbol: self.symbol.clone(),
            quantity,
        })
    }

    fn speak_balance_sheet(&self) {
        match self.documents.fetch_balance_sheet(&self.symbol) {
            Ok(sheet) => self.speaker.say(&render_balance_sheet(&sheet)),
            Err(e) => {
                warn!(symbol = %self.symbol, error = %e, "balance sheet lookup failed");
                self.speaker
                    .say(&format!("Balance sheet not available for {}.", self.symbol));
            }
        }
    }
}

//! Balance-sheet document port.

use crate::domain::error::SigtraderError;

#[derive(Debug, Clone, PartialEq)]
pub struct BalanceSheetRow {
    pub label: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BalanceSheet {
    pub symbol: String,
    /// Period headers, one per value column.
    pub periods: Vec<String>,
    pub rows: Vec<BalanceSheetRow>,
}

pub trait DocumentPort {
    /// `Err(NotFound)` when the provider has no report for the symbol.
    fn fetch_balance_sheet(&self, symbol: &str) -> Result<BalanceSheet, SigtraderError>;
}

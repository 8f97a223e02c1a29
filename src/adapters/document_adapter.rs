//! Balance sheets from `<dir>/<SYMBOL>_balance_sheet.csv`.
//!
//! First header cell labels the row names, the rest are period columns.

use crate::domain::error::SigtraderError;
use crate::ports::document_port::{BalanceSheet, BalanceSheetRow, DocumentPort};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

const PROVIDER: &str = "balance sheet";

pub struct CsvDocumentAdapter {
    base_path: PathBuf,
}

impl CsvDocumentAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }
}

impl DocumentPort for CsvDocumentAdapter {
    fn fetch_balance_sheet(&self, symbol: &str) -> Result<BalanceSheet, SigtraderError> {
        let path = self
            .base_path
            .join(format!("{}_balance_sheet.csv", symbol));
        let content = fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => SigtraderError::NotFound {
                what: format!("balance sheet for {}", symbol),
            },
            _ => SigtraderError::unavailable(PROVIDER, symbol, e.to_string()),
        })?;

        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(content.as_bytes());

        let periods: Vec<String> = rdr
            .headers()
            .map_err(|e| SigtraderError::malformed(PROVIDER, symbol, e.to_string()))?
            .iter()
            .skip(1)
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for result in rdr.records() {
            let record =
                result.map_err(|e| SigtraderError::malformed(PROVIDER, symbol, e.to_string()))?;
            let mut cells = record.iter().map(|c| c.trim().to_string());
            let Some(label) = cells.next().filter(|l| !l.is_empty()) else {
                continue;
            };
            rows.push(BalanceSheetRow {
                label,
                values: cells.collect(),
            });
        }

        Ok(BalanceSheet {
            symbol: symbol.to_string(),
            periods,
            rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn reads_rows_and_periods() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("AAPL_balance_sheet.csv"),
            "item,2023,2022\nTotal Assets,352583,352755\nTotal Liabilities,290437,302083\n,,\n",
        )
        .unwrap();

        let adapter = CsvDocumentAdapter::new(dir.path().to_path_buf());
        let sheet = adapter.fetch_balance_sheet("AAPL").unwrap();

        assert_eq!(sheet.periods, vec!["2023", "2022"]);
        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(sheet.rows[0].label, "Total Assets");
        assert_eq!(sheet.rows[1].values, vec!["290437", "302083"]);
    }

    #[test]
    fn missing_report_is_not_found() {
        let dir = TempDir::new().unwrap();
        let adapter = CsvDocumentAdapter::new(dir.path().to_path_buf());
        assert!(matches!(
            adapter.fetch_balance_sheet("MSFT"),
            Err(SigtraderError::NotFound { .. })
        ));
    }
}

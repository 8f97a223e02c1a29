//! Historical bar provider port.

use crate::domain::error::SigtraderError;
use crate::domain::ohlcv::{Interval, OhlcvBar};

/// Returns bars sorted ascending with no duplicate timestamps.
///
/// An empty vector means "no data"; `Err` means the provider itself failed.
/// Any caching is the implementation's concern.
pub trait HistoryPort {
    fn fetch_bars(
        &self,
        symbol: &str,
        interval: Interval,
        lookback_days: u32,
    ) -> Result<Vec<OhlcvBar>, SigtraderError>;
}

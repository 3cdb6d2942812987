//! Market data and instrument metadata port.

use crate::domain::error::AdvisorError;
use crate::domain::price::PricePoint;
use chrono::NaiveDate;

pub trait DataPort {
    /// Daily closes for `symbol` within `[start_date, end_date]`, oldest first.
    fn fetch_closes(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<PricePoint>, AdvisorError>;

    /// Long display name, if the source knows one.
    fn display_name(&self, symbol: &str) -> Option<String>;
}

pub const UNKNOWN_NAME: &str = "Unknown";

/// Display name with the `"Unknown"` default applied.
pub fn display_name_or_unknown(port: &dyn DataPort, symbol: &str) -> String {
    port.display_name(symbol)
        .unwrap_or_else(|| UNKNOWN_NAME.to_string())
}

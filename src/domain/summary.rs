//! Aggregate statistics over a selection.

use serde::Serialize;

use crate::domain::error::AdvisorError;
use crate::domain::stats::InstrumentStats;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PortfolioSummary {
    pub average_volatility: f64,
    pub average_return: f64,
}

/// Equal-weight mean volatility and return.
///
/// An empty selection has no aggregate; this returns
/// [`AdvisorError::EmptySelection`] instead of zeros.
pub fn summarize(selection: &[InstrumentStats]) -> Result<PortfolioSummary, AdvisorError> {
    if selection.is_empty() {
        return Err(AdvisorError::EmptySelection);
    }

    let n = selection.len() as f64;
    let average_volatility = selection.iter().map(|s| s.annual_volatility).sum::<f64>() / n;
    let average_return = selection.iter().map(|s| s.annual_return).sum::<f64>() / n;

    Ok(PortfolioSummary {
        average_volatility,
        average_return,
    })
}

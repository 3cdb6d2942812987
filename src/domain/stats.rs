//! Per-instrument annualized statistics and the statistics table.
//!
//! Volatility is the sample standard deviation of daily simple returns
//! scaled by sqrt(252); return is the mean daily simple return scaled by 252.
//! An instrument whose series cannot produce both numbers is left out of the
//! table entirely rather than zero-filled.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::error::AdvisorError;
use crate::domain::price::{PricePoint, daily_returns};
use crate::ports::data_port::DataPort;

pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstrumentStats {
    pub symbol: String,
    pub annual_volatility: f64,
    pub annual_return: f64,
}

impl InstrumentStats {
    pub fn new(symbol: impl Into<String>, annual_volatility: f64, annual_return: f64) -> Self {
        Self {
            symbol: symbol.into(),
            annual_volatility,
            annual_return,
        }
    }
}

/// Estimate annualized statistics from chronologically ordered closes.
///
/// Returns `None` when fewer than two returns are available (the sample
/// deviation is undefined) or when any intermediate value is not finite.
pub fn estimate(symbol: &str, closes: &[f64]) -> Option<InstrumentStats> {
    if closes.len() < 2 {
        return None;
    }

    let returns = daily_returns(closes);
    if returns.len() < 2 {
        return None;
    }

    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1.0);

    let annual_volatility = variance.sqrt() * TRADING_DAYS_PER_YEAR.sqrt();
    let annual_return = mean * TRADING_DAYS_PER_YEAR;

    if !annual_volatility.is_finite() || !annual_return.is_finite() {
        return None;
    }

    Some(InstrumentStats::new(symbol, annual_volatility, annual_return))
}

/// Convenience wrapper over [`estimate`] for a dated series.
pub fn estimate_series(symbol: &str, series: &[PricePoint]) -> Option<InstrumentStats> {
    let closes: Vec<f64> = series
        .iter()
        .filter(|p| p.is_valid())
        .map(|p| p.close)
        .collect();
    estimate(symbol, &closes)
}

/// Immutable snapshot of per-instrument statistics, in universe order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatsTable {
    records: Vec<InstrumentStats>,
}

impl StatsTable {
    /// Build a table, rejecting duplicate symbols and undefined numbers.
    pub fn new(records: Vec<InstrumentStats>) -> Result<Self, AdvisorError> {
        let mut seen = HashSet::new();
        for record in &records {
            if !seen.insert(record.symbol.as_str()) {
                return Err(AdvisorError::MalformedTable {
                    reason: format!("duplicate symbol {}", record.symbol),
                });
            }
            if !record.annual_volatility.is_finite() || !record.annual_return.is_finite() {
                return Err(AdvisorError::MalformedTable {
                    reason: format!("undefined statistics for {}", record.symbol),
                });
            }
            if record.annual_volatility < 0.0 {
                return Err(AdvisorError::MalformedTable {
                    reason: format!("negative volatility for {}", record.symbol),
                });
            }
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[InstrumentStats] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Fetch every symbol's closes and estimate its statistics.
///
/// A symbol whose data cannot be fetched, or whose series is too short,
/// is skipped with a warning.
pub fn build_stats_table(
    data_port: &dyn DataPort,
    symbols: &[String],
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<StatsTable, AdvisorError> {
    let mut records = Vec::with_capacity(symbols.len());

    for symbol in symbols {
        let series = match data_port.fetch_closes(symbol, start_date, end_date) {
            Ok(series) => series,
            Err(e) => {
                tracing::warn!(%symbol, error = %e, "skipping symbol");
                continue;
            }
        };

        match estimate_series(symbol, &series) {
            Some(stats) => {
                tracing::debug!(
                    %symbol,
                    points = series.len(),
                    volatility = stats.annual_volatility,
                    annual_return = stats.annual_return,
                    "estimated statistics"
                );
                records.push(stats);
            }
            None => {
                tracing::warn!(%symbol, points = series.len(), "skipping symbol: insufficient data");
            }
        }
    }

    tracing::info!(
        loaded = records.len(),
        requested = symbols.len(),
        "statistics table built"
    );

    StatsTable::new(records)
}

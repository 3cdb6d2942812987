#![allow(dead_code)]

use allocassist::domain::error::AdvisorError;
pub use allocassist::domain::price::PricePoint;
use allocassist::domain::stats::{InstrumentStats, StatsTable};
use allocassist::ports::data_port::DataPort;
use chrono::{Duration, NaiveDate};
use std::collections::HashMap;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<PricePoint>>,
    pub errors: HashMap<String, String>,
    pub names: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
            names: HashMap::new(),
        }
    }

    pub fn with_prices(mut self, symbol: &str, prices: Vec<PricePoint>) -> Self {
        self.data.insert(symbol.to_string(), prices);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }

    pub fn with_name(mut self, symbol: &str, name: &str) -> Self {
        self.names.insert(symbol.to_string(), name.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_closes(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<PricePoint>, AdvisorError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(AdvisorError::NoData {
                symbol: symbol.to_string(),
                reason: reason.clone(),
            });
        }
        Ok(self
            .data
            .get(symbol)
            .map(|points| {
                points
                    .iter()
                    .filter(|p| p.date >= start_date && p.date <= end_date)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn display_name(&self, symbol: &str) -> Option<String> {
        self.names.get(symbol).cloned()
    }
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Daily series starting at `start`, one point per calendar day.
pub fn make_series(start: &str, closes: &[f64]) -> Vec<PricePoint> {
    let start = date(start);
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| PricePoint::new(start + Duration::days(i as i64), close))
        .collect()
}

/// Series that alternates up and down around a drift, giving non-zero volatility.
pub fn zigzag(start: &str, n: usize, base: f64, swing: f64, drift: f64) -> Vec<PricePoint> {
    let closes: Vec<f64> = (0..n)
        .map(|i| {
            let sign = if i % 2 == 0 { 1.0 } else { -1.0 };
            base * (1.0 + drift).powi(i as i32) * (1.0 + sign * swing)
        })
        .collect();
    make_series(start, &closes)
}

pub fn stats(symbol: &str, volatility: f64, annual_return: f64) -> InstrumentStats {
    InstrumentStats::new(symbol, volatility, annual_return)
}

pub fn table(records: Vec<InstrumentStats>) -> StatsTable {
    StatsTable::new(records).unwrap()
}

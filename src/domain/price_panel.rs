//! Date-aligned closes for several instruments.
//!
//! Only dates on which every included symbol has a close survive the join,
//! so each row is complete.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use crate::domain::price::PricePoint;
use crate::ports::data_port::DataPort;

#[derive(Debug, Clone, PartialEq)]
pub struct PanelRow {
    pub date: NaiveDate,
    pub closes: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PricePanel {
    pub symbols: Vec<String>,
    pub rows: Vec<PanelRow>,
}

impl PricePanel {
    /// Inner join of each series on date.
    pub fn align(series: &[(String, Vec<PricePoint>)]) -> Self {
        if series.is_empty() {
            return Self::default();
        }

        let lookups: Vec<BTreeMap<NaiveDate, f64>> = series
            .iter()
            .map(|(_, points)| points.iter().map(|p| (p.date, p.close)).collect())
            .collect();

        let mut common: BTreeSet<NaiveDate> = lookups[0].keys().copied().collect();
        for lookup in &lookups[1..] {
            common.retain(|d| lookup.contains_key(d));
        }

        let rows = common
            .into_iter()
            .map(|date| PanelRow {
                date,
                closes: lookups.iter().map(|l| l[&date]).collect(),
            })
            .collect();

        Self {
            symbols: series.iter().map(|(s, _)| s.clone()).collect(),
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Every column rescaled so its first row equals `base`.
    pub fn rebased(&self, base: f64) -> Self {
        let Some(first) = self.rows.first() else {
            return self.clone();
        };
        let anchors = first.closes.clone();
        let rows = self
            .rows
            .iter()
            .map(|row| PanelRow {
                date: row.date,
                closes: row
                    .closes
                    .iter()
                    .zip(&anchors)
                    .map(|(close, anchor)| close / anchor * base)
                    .collect(),
            })
            .collect();
        Self {
            symbols: self.symbols.clone(),
            rows,
        }
    }

    /// Column of values for the symbol at `index`.
    pub fn column(&self, index: usize) -> Vec<f64> {
        self.rows.iter().map(|r| r.closes[index]).collect()
    }
}

/// Fetch and align closes for `symbols`. Symbols that fail to load, or
/// have no points in range, are left out with a warning.
pub fn fetch_panel(
    data_port: &dyn DataPort,
    symbols: &[String],
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> PricePanel {
    let mut series = Vec::with_capacity(symbols.len());
    for symbol in symbols {
        match data_port.fetch_closes(symbol, start_date, end_date) {
            Ok(points) if !points.is_empty() => series.push((symbol.clone(), points)),
            Ok(_) => tracing::warn!(%symbol, "no prices in range, leaving out of panel"),
            Err(e) => tracing::warn!(%symbol, error = %e, "leaving out of panel"),
        }
    }
    PricePanel::align(&series)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn points(values: &[(u32, f64)]) -> Vec<PricePoint> {
        values.iter().map(|&(day, c)| PricePoint::new(d(day), c)).collect()
    }

    #[test]
    fn align_keeps_common_dates_only() {
        let panel = PricePanel::align(&[
            ("A".into(), points(&[(1, 10.0), (2, 11.0), (3, 12.0)])),
            ("B".into(), points(&[(2, 20.0), (3, 21.0), (4, 22.0)])),
        ]);
        assert_eq!(panel.symbols, vec!["A", "B"]);
        assert_eq!(panel.rows.len(), 2);
        assert_eq!(panel.rows[0], PanelRow { date: d(2), closes: vec![11.0, 20.0] });
        assert_eq!(panel.rows[1], PanelRow { date: d(3), closes: vec![12.0, 21.0] });
    }

    #[test]
    fn align_empty_input() {
        assert!(PricePanel::align(&[]).is_empty());
    }

    #[test]
    fn rebased_starts_at_base() {
        let panel = PricePanel::align(&[
            ("A".into(), points(&[(1, 50.0), (2, 75.0)])),
            ("B".into(), points(&[(1, 200.0), (2, 100.0)])),
        ])
        .rebased(100.0);
        assert_eq!(panel.column(0), vec![100.0, 150.0]);
        assert_eq!(panel.column(1), vec![100.0, 50.0]);
    }
}

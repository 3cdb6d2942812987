//! CSV price snapshot adapter.
//!
//! One file per symbol, `<base>/<SYMBOL>.csv`, with a header row holding
//! `date` and `close` columns (matched case-insensitively, other columns
//! ignored). Display names come from an optional `symbol,name` file.

use crate::domain::error::AdvisorError;
use crate::domain::price::PricePoint;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

pub struct CsvAdapter {
    base_path: PathBuf,
    names: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct NameRow {
    symbol: String,
    name: String,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self {
            base_path,
            names: HashMap::new(),
        }
    }

    pub fn with_names_file(mut self, path: &Path) -> Result<Self, AdvisorError> {
        let mut rdr = csv::Reader::from_path(path).map_err(|e| AdvisorError::DataFormat {
            symbol: "names".into(),
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        for row in rdr.deserialize::<NameRow>() {
            let row = row.map_err(|e| AdvisorError::DataFormat {
                symbol: "names".into(),
                reason: format!("CSV parse error: {}", e),
            })?;
            let name = row.name.trim();
            if !name.is_empty() {
                self.names
                    .insert(row.symbol.trim().to_uppercase(), name.to_string());
            }
        }
        Ok(self)
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol))
    }
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
}

impl DataPort for CsvAdapter {
    fn fetch_closes(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<PricePoint>, AdvisorError> {
        let path = self.csv_path(symbol);
        let content = fs::read_to_string(&path).map_err(|e| AdvisorError::NoData {
            symbol: symbol.to_string(),
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let headers = rdr.headers().map_err(|e| AdvisorError::DataFormat {
            symbol: symbol.to_string(),
            reason: format!("CSV header error: {}", e),
        })?;
        let date_col = column_index(headers, "date").ok_or_else(|| AdvisorError::DataFormat {
            symbol: symbol.to_string(),
            reason: "missing date column".into(),
        })?;
        let close_col = column_index(headers, "close").ok_or_else(|| AdvisorError::DataFormat {
            symbol: symbol.to_string(),
            reason: "missing close column".into(),
        })?;

        // keyed by date: sorted, and a repeated date keeps its last close
        let mut closes: BTreeMap<NaiveDate, f64> = BTreeMap::new();

        for result in rdr.records() {
            let record = result.map_err(|e| AdvisorError::DataFormat {
                symbol: symbol.to_string(),
                reason: format!("CSV parse error: {}", e),
            })?;

            let date_str = record.get(date_col).unwrap_or_default().trim();
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
                AdvisorError::DataFormat {
                    symbol: symbol.to_string(),
                    reason: format!("invalid date {:?}: {}", date_str, e),
                }
            })?;

            if date < start_date || date > end_date {
                continue;
            }

            let close = match record.get(close_col).map(str::trim).map(str::parse::<f64>) {
                Some(Ok(v)) => PricePoint::new(date, v),
                _ => continue,
            };
            if close.is_valid() {
                closes.insert(close.date, close.close);
            }
        }

        Ok(closes
            .into_iter()
            .map(|(date, close)| PricePoint::new(date, close))
            .collect())
    }

    fn display_name(&self, symbol: &str) -> Option<String> {
        self.names.get(&symbol.to_uppercase()).cloned()
    }

}

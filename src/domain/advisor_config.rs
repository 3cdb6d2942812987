//! Typed advisor configuration, validated from a [`ConfigPort`].
//!
//! Sections: `[universe]` (tickers, safe, high_growth), `[data]`
//! (prices_dir, names_file, lookback_years, end_date), `[logging]` (level)
//! and `[web]` (listen).

use std::path::PathBuf;

use chrono::{Duration, NaiveDate};

use crate::domain::asset_class::{AssetClasses, DEFAULT_HIGH_GROWTH, DEFAULT_SAFE, default_tickers};
use crate::domain::error::AdvisorError;
use crate::domain::universe::parse_tickers;
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_LOOKBACK_YEARS: i64 = 5;
pub const MAX_LOOKBACK_YEARS: i64 = 50;
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_LISTEN: &str = "127.0.0.1:3000";

#[derive(Debug, Clone)]
pub struct AdvisorConfig {
    pub tickers: Vec<String>,
    pub asset_classes: AssetClasses,
    pub prices_dir: PathBuf,
    pub names_file: Option<PathBuf>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub log_level: String,
    pub listen: String,
}

impl AdvisorConfig {
    /// Build from config, using `today` when `[data] end_date` is absent.
    pub fn from_port(config: &dyn ConfigPort, today: NaiveDate) -> Result<Self, AdvisorError> {
        let tickers = ticker_list(config, "tickers")?.unwrap_or_else(default_tickers);

        let safe = ticker_list(config, "safe")?
            .unwrap_or_else(|| DEFAULT_SAFE.iter().map(|s| s.to_string()).collect());
        let high_growth = ticker_list(config, "high_growth")?
            .unwrap_or_else(|| DEFAULT_HIGH_GROWTH.iter().map(|s| s.to_string()).collect());

        let prices_dir = config
            .get_string("data", "prices_dir")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .ok_or_else(|| AdvisorError::ConfigMissing {
                section: "data".into(),
                key: "prices_dir".into(),
            })?;

        let names_file = config
            .get_string("data", "names_file")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        let end_date = match config.get_string("data", "end_date") {
            Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
                AdvisorError::ConfigInvalid {
                    section: "data".into(),
                    key: "end_date".into(),
                    reason: "invalid date format (expected YYYY-MM-DD)".into(),
                }
            })?,
            None => today,
        };

        let lookback_years = config.get_int("data", "lookback_years", DEFAULT_LOOKBACK_YEARS);
        if !(1..=MAX_LOOKBACK_YEARS).contains(&lookback_years) {
            return Err(AdvisorError::ConfigInvalid {
                section: "data".into(),
                key: "lookback_years".into(),
                reason: format!("lookback_years must be between 1 and {MAX_LOOKBACK_YEARS}"),
            });
        }
        let start_date = end_date - Duration::days(lookback_years * 365);

        let log_level = config
            .get_string("logging", "level")
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
        let listen = config
            .get_string("web", "listen")
            .unwrap_or_else(|| DEFAULT_LISTEN.to_string());

        Ok(Self {
            tickers,
            asset_classes: AssetClasses::new(safe, high_growth),
            prices_dir,
            names_file,
            start_date,
            end_date,
            log_level,
            listen,
        })
    }
}

fn ticker_list(config: &dyn ConfigPort, key: &str) -> Result<Option<Vec<String>>, AdvisorError> {
    match config.get_string("universe", key) {
        None => Ok(None),
        Some(raw) => parse_tickers(&raw)
            .map(Some)
            .map_err(|e| AdvisorError::ConfigInvalid {
                section: "universe".into(),
                key: key.into(),
                reason: e.to_string(),
            }),
    }
}

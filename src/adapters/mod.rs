//! Concrete adapter implementations for ports, plus console and web front ends.

pub mod chart_svg;
pub mod console_report;
pub mod csv_adapter;
pub mod file_config_adapter;
pub mod price_export;
pub mod prompt;
#[cfg(feature = "web")]
pub mod web;

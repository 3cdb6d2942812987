//! Plain-text rendering of recommendations and statistics for the console.

use std::fmt::Write;

use crate::domain::profile::UserProfile;
use crate::domain::selection::{Recommendation, SelectionBasis};
use crate::domain::stats::{InstrumentStats, StatsTable};
use crate::ports::data_port::{DataPort, display_name_or_unknown};

pub const CLOSEST_MATCH_NOTICE: &str =
    "None of the results will fit you perfectly, but here are the most relevant recommendations!";
pub const UNAVAILABLE_NOTICE: &str =
    "No recommendation available: no instrument statistics could be computed.";

/// Fraction as a percentage with two decimals (`0.1234` -> `12.34%`).
pub fn format_pct(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

fn instrument_line(stats: &InstrumentStats, name: &str) -> String {
    format!(
        "- {} ({}) | Volatility: {} | Annual Return: {}",
        stats.symbol,
        name,
        format_pct(stats.annual_volatility),
        format_pct(stats.annual_return)
    )
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn format_recommendation(
    recommendation: &Recommendation,
    profile: &UserProfile,
    names: &dyn DataPort,
) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Recommendations for a {} investor with an investment of {:.0} € ({} horizon, {:.1}% desired return):",
        capitalize(profile.risk_profile.label()),
        profile.amount,
        profile.horizon,
        profile.desired_return
    );

    match recommendation {
        Recommendation::Unavailable => {
            let _ = writeln!(out, "{}", UNAVAILABLE_NOTICE);
        }
        Recommendation::Portfolio { selection, summary } => {
            if selection.basis == SelectionBasis::ClosestReturn {
                let _ = writeln!(out, "{}", CLOSEST_MATCH_NOTICE);
            }
            for stats in &selection.instruments {
                let name = display_name_or_unknown(names, &stats.symbol);
                let _ = writeln!(out, "{}", instrument_line(stats, &name));
            }
            let _ = writeln!(
                out,
                "Average portfolio volatility: {}",
                format_pct(summary.average_volatility)
            );
            let _ = writeln!(out, "Average portfolio return: {}", format_pct(summary.average_return));
        }
    }

    out
}

pub fn format_stats_table(table: &StatsTable, names: &dyn DataPort) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<10} {:>12} {:>14}  Name",
        "Symbol", "Volatility", "Annual Return"
    );
    for stats in table.records() {
        let _ = writeln!(
            out,
            "{:<10} {:>12} {:>14}  {}",
            stats.symbol,
            format_pct(stats.annual_volatility),
            format_pct(stats.annual_return),
            display_name_or_unknown(names, &stats.symbol)
        );
    }
    let _ = writeln!(out, "{} instruments", table.len());
    out
}

//! Portfolio suggestion: eligibility filter, horizon tranches and the
//! closest-return fallback.
//!
//! Selection is a pure function of the statistics table, the asset-class
//! partition and the user profile. Table order is the only tie-break.

use serde::Serialize;

use crate::domain::asset_class::AssetClasses;
use crate::domain::error::AdvisorError;
use crate::domain::profile::{Horizon, UserProfile};
use crate::domain::sizing::target_size;
use crate::domain::stats::{InstrumentStats, StatsTable};
use crate::domain::summary::{PortfolioSummary, summarize};

/// Percentage of the target reserved for safe instruments on a short horizon.
pub const SHORT_SAFE_SHARE_PCT: usize = 80;
/// Percentage of the target reserved for high-growth instruments on a long horizon.
pub const LONG_GROWTH_SHARE_PCT: usize = 70;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionBasis {
    /// Instruments passed the risk and return filters.
    Eligible,
    /// Nothing passed the filters; instruments ranked by closeness of return.
    ClosestReturn,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    pub instruments: Vec<InstrumentStats>,
    pub basis: SelectionBasis,
    pub target_size: usize,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    pub fn symbols(&self) -> Vec<&str> {
        self.instruments.iter().map(|s| s.symbol.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Recommendation {
    Portfolio {
        selection: Selection,
        summary: PortfolioSummary,
    },
    /// The statistics table was empty; there is nothing to recommend.
    Unavailable,
}

/// Integer share of `target`, truncated toward zero.
pub fn tranche_quota(target: usize, share_pct: usize) -> usize {
    target * share_pct / 100
}

pub fn select(table: &StatsTable, classes: &AssetClasses, profile: &UserProfile) -> Selection {
    let target = target_size(profile.amount);
    let band = profile.risk_profile.volatility_band();
    let threshold = profile.return_threshold();

    let eligible: Vec<&InstrumentStats> = table
        .records()
        .iter()
        .filter(|s| band.contains(s.annual_volatility) && s.annual_return >= threshold)
        .collect();

    if eligible.is_empty() {
        tracing::debug!(
            risk = %profile.risk_profile,
            desired_return = profile.desired_return,
            "no eligible instruments, ranking by closest return"
        );
        return Selection {
            instruments: closest_return(table, threshold, target),
            basis: SelectionBasis::ClosestReturn,
            target_size: target,
        };
    }

    let mut picks = match profile.horizon {
        Horizon::Short => tranche(&eligible, target, SHORT_SAFE_SHARE_PCT, |s| {
            classes.is_safe(s)
        }),
        Horizon::Long => tranche(&eligible, target, LONG_GROWTH_SHARE_PCT, |s| {
            classes.is_high_growth(s)
        }),
        Horizon::Medium | Horizon::Unrecognized => eligible.iter().take(target).copied().collect(),
    };
    picks.truncate(target);

    Selection {
        instruments: picks.into_iter().cloned().collect(),
        basis: SelectionBasis::Eligible,
        target_size: target,
    }
}

/// Preferred-class instruments first, up to their quota, then the remainder
/// of the target from the rest. A short bucket is not backfilled.
fn tranche<'a, F>(
    eligible: &[&'a InstrumentStats],
    target: usize,
    share_pct: usize,
    preferred: F,
) -> Vec<&'a InstrumentStats>
where
    F: Fn(&str) -> bool,
{
    let quota = tranche_quota(target, share_pct);
    let remainder = target - quota;

    let (favoured, others): (Vec<&InstrumentStats>, Vec<&InstrumentStats>) = eligible
        .iter()
        .copied()
        .partition(|s| preferred(&s.symbol));

    favoured
        .into_iter()
        .take(quota)
        .chain(others.into_iter().take(remainder))
        .collect()
}

fn closest_return(table: &StatsTable, threshold: f64, target: usize) -> Vec<InstrumentStats> {
    let mut ranked: Vec<&InstrumentStats> = table.records().iter().collect();
    // sort_by is stable, so equal distances keep table order
    ranked.sort_by(|a, b| {
        let da = (a.annual_return - threshold).abs();
        let db = (b.annual_return - threshold).abs();
        da.total_cmp(&db)
    });
    ranked.into_iter().take(target).cloned().collect()
}

/// Select, then summarize. An empty selection is only possible when the
/// table itself is empty and yields [`Recommendation::Unavailable`].
pub fn recommend(
    table: &StatsTable,
    classes: &AssetClasses,
    profile: &UserProfile,
) -> Result<Recommendation, AdvisorError> {
    let selection = select(table, classes, profile);
    if selection.is_empty() {
        return Ok(Recommendation::Unavailable);
    }
    let summary = summarize(&selection.instruments)?;
    Ok(Recommendation::Portfolio { selection, summary })
}

//! Risk profiles and the volatility band each one admits.

use std::fmt;

use serde::Serialize;

pub const CONSERVATIVE_CEILING: f64 = 0.20;
pub const AGGRESSIVE_FLOOR: f64 = 0.40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskProfile {
    Conservative,
    Balanced,
    Aggressive,
    /// Any label outside the canonical three.
    Unrecognized,
}

impl RiskProfile {
    pub const ALL: [RiskProfile; 3] = [
        RiskProfile::Conservative,
        RiskProfile::Balanced,
        RiskProfile::Aggressive,
    ];

    /// Exact, case-insensitive match on the canonical label. No fuzzy
    /// matching happens here.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "conservative" => RiskProfile::Conservative,
            "balanced" => RiskProfile::Balanced,
            "aggressive" => RiskProfile::Aggressive,
            _ => RiskProfile::Unrecognized,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskProfile::Conservative => "conservative",
            RiskProfile::Balanced => "balanced",
            RiskProfile::Aggressive => "aggressive",
            RiskProfile::Unrecognized => "unrecognized",
        }
    }

    pub fn volatility_band(&self) -> VolatilityBand {
        match self {
            RiskProfile::Conservative => VolatilityBand::Below(CONSERVATIVE_CEILING),
            RiskProfile::Balanced => VolatilityBand::Between(CONSERVATIVE_CEILING, AGGRESSIVE_FLOOR),
            RiskProfile::Aggressive => VolatilityBand::AtLeast(AGGRESSIVE_FLOOR),
            RiskProfile::Unrecognized => VolatilityBand::Empty,
        }
    }
}

impl fmt::Display for RiskProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Membership predicate over annualized volatility.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VolatilityBand {
    /// `vol < ceiling`
    Below(f64),
    /// `low <= vol < high`
    Between(f64, f64),
    /// `vol >= floor`
    AtLeast(f64),
    /// Admits nothing.
    Empty,
}

impl VolatilityBand {
    pub fn contains(&self, volatility: f64) -> bool {
        match *self {
            VolatilityBand::Below(ceiling) => volatility < ceiling,
            VolatilityBand::Between(low, high) => low <= volatility && volatility < high,
            VolatilityBand::AtLeast(floor) => volatility >= floor,
            VolatilityBand::Empty => false,
        }
    }
}

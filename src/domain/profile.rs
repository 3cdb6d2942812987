//! Per-request investor profile.

use std::fmt;

use serde::Serialize;

use crate::domain::error::AdvisorError;
use crate::domain::risk::RiskProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Horizon {
    Short,
    Medium,
    Long,
    /// Any label outside the canonical three; treated like `Medium`.
    Unrecognized,
}

impl Horizon {
    pub const ALL: [Horizon; 3] = [Horizon::Short, Horizon::Medium, Horizon::Long];

    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "short" => Horizon::Short,
            "medium" => Horizon::Medium,
            "long" => Horizon::Long,
            _ => Horizon::Unrecognized,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Horizon::Short => "short",
            Horizon::Medium => "medium",
            Horizon::Long => "long",
            Horizon::Unrecognized => "unrecognized",
        }
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserProfile {
    pub amount: f64,
    pub risk_profile: RiskProfile,
    pub horizon: Horizon,
    /// Desired annual return in percent (`8.0` means 8%).
    pub desired_return: f64,
}

impl UserProfile {
    pub fn new(amount: f64, risk_profile: RiskProfile, horizon: Horizon, desired_return: f64) -> Self {
        Self {
            amount,
            risk_profile,
            horizon,
            desired_return,
        }
    }

    /// Like [`UserProfile::new`], but rejects an amount or desired return
    /// that is not a finite positive number.
    pub fn try_new(
        amount: f64,
        risk_profile: RiskProfile,
        horizon: Horizon,
        desired_return: f64,
    ) -> Result<Self, AdvisorError> {
        positive("amount", amount)?;
        positive("desired return", desired_return)?;
        Ok(Self::new(amount, risk_profile, horizon, desired_return))
    }

    /// Desired return as a fraction, comparable with annualized returns.
    pub fn return_threshold(&self) -> f64 {
        self.desired_return / 100.0
    }
}

fn positive(field: &str, value: f64) -> Result<(), AdvisorError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(AdvisorError::InvalidInput {
            field: field.to_string(),
            reason: format!("must be a positive number, got {}", value),
        })
    }
}

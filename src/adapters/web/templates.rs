//! HTML templates using Askama.

use askama::Template;

use crate::adapters::console_report::{CLOSEST_MATCH_NOTICE, UNAVAILABLE_NOTICE, format_pct};
use crate::domain::profile::UserProfile;
use crate::domain::selection::{Recommendation, SelectionBasis};
use crate::ports::data_port::{DataPort, display_name_or_unknown};

#[derive(Template)]
#[template(path = "form.html")]
pub struct FormTemplate {
    pub lookback: String,
    pub instrument_count: usize,
}

pub struct PickRow {
    pub symbol: String,
    pub name: String,
    pub volatility: String,
    pub annual_return: String,
}

#[derive(Template)]
#[template(path = "result.html")]
pub struct ResultTemplate<'a> {
    pub risk_label: &'a str,
    pub amount: String,
    pub unavailable: bool,
    pub closest_match: bool,
    pub notice: &'a str,
    pub rows: Vec<PickRow>,
    pub average_volatility: String,
    pub average_return: String,
    pub chart_svg: String,
}

impl<'a> ResultTemplate<'a> {
    pub fn new(
        recommendation: &Recommendation,
        profile: &'a UserProfile,
        names: &dyn DataPort,
        chart_svg: String,
    ) -> Self {
        let mut template = Self {
            risk_label: profile.risk_profile.label(),
            amount: format!("{:.0}", profile.amount),
            unavailable: true,
            closest_match: false,
            notice: UNAVAILABLE_NOTICE,
            rows: Vec::new(),
            average_volatility: String::new(),
            average_return: String::new(),
            chart_svg,
        };

        if let Recommendation::Portfolio { selection, summary } = recommendation {
            template.unavailable = false;
            template.closest_match = selection.basis == SelectionBasis::ClosestReturn;
            template.notice = CLOSEST_MATCH_NOTICE;
            template.rows = selection
                .instruments
                .iter()
                .map(|s| PickRow {
                    symbol: s.symbol.clone(),
                    name: display_name_or_unknown(names, &s.symbol),
                    volatility: format_pct(s.annual_volatility),
                    annual_return: format_pct(s.annual_return),
                })
                .collect();
            template.average_volatility = format_pct(summary.average_volatility);
            template.average_return = format_pct(summary.average_return);
        }
        template
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate<'a> {
    pub message: &'a str,
    pub status: u16,
}

//! HTTP request handlers for the web adapter.

use askama::Template;
use axum::{
    Form, Json,
    extract::State,
    response::{Html, IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::adapters::chart_svg::format_price_chart;
use crate::domain::price_panel::fetch_panel;
use crate::domain::profile::{Horizon, UserProfile};
use crate::domain::risk::RiskProfile;
use crate::domain::selection::{Recommendation, recommend};

use super::templates::{FormTemplate, ResultTemplate};
use super::{ApiError, AppState, WebError};

fn render<T: Template>(template: &T) -> Result<Response, WebError> {
    template
        .render()
        .map(|html| Html(html).into_response())
        .map_err(|e| WebError::internal(format!("template error: {}", e)))
}

pub async fn index(State(state): State<Arc<AppState>>) -> Result<Response, WebError> {
    let years = (state.end_date - state.start_date).num_days() / 365;
    let template = FormTemplate {
        lookback: format!("{} years", years),
        instrument_count: state.table.len(),
    };
    render(&template)
}

#[derive(Debug, Deserialize)]
pub struct SuggestFormData {
    pub amount: String,
    pub risk_profile: String,
    pub horizon: String,
    pub desired_return: String,
}

#[derive(Debug, Deserialize)]
pub struct SuggestRequest {
    pub amount: f64,
    pub risk_profile: String,
    pub horizon: String,
    pub desired_return: f64,
}

#[derive(Debug, Serialize)]
pub struct SuggestResponse {
    pub profile: UserProfile,
    pub recommendation: Recommendation,
}

/// Validate raw request fields into a profile. Labels must be exact
/// (case-insensitive); the web form never sends anything else.
fn parse_profile(
    amount: f64,
    risk_profile: &str,
    horizon: &str,
    desired_return: f64,
) -> Result<UserProfile, WebError> {
    let risk = RiskProfile::from_label(risk_profile.trim());
    if risk == RiskProfile::Unrecognized {
        return Err(WebError::bad_request(format!(
            "Unknown risk profile: {}",
            risk_profile
        )));
    }
    let horizon_value = Horizon::from_label(horizon.trim());
    if horizon_value == Horizon::Unrecognized {
        return Err(WebError::bad_request(format!("Unknown horizon: {}", horizon)));
    }
    Ok(UserProfile::try_new(amount, risk, horizon_value, desired_return)?)
}

fn parse_number(value: &str, field: &str) -> Result<f64, WebError> {
    value
        .trim()
        .parse()
        .map_err(|_| WebError::bad_request(format!("Invalid {}", field)))
}

pub async fn suggest(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SuggestFormData>,
) -> Result<Response, WebError> {
    let profile = parse_profile(
        parse_number(&form.amount, "amount")?,
        &form.risk_profile,
        &form.horizon,
        parse_number(&form.desired_return, "desired return")?,
    )?;

    let recommendation = recommend(&state.table, &state.asset_classes, &profile)?;
    tracing::info!(
        risk = %profile.risk_profile,
        horizon = %profile.horizon,
        amount = profile.amount,
        "web suggestion"
    );

    let chart_svg = match &recommendation {
        Recommendation::Portfolio { selection, .. } => {
            let symbols: Vec<String> = selection
                .instruments
                .iter()
                .map(|s| s.symbol.clone())
                .collect();
            let data_port = Arc::clone(&state.data_port);
            let (start_date, end_date) = (state.start_date, state.end_date);
            // price files are read synchronously
            tokio::task::spawn_blocking(move || {
                let panel = fetch_panel(data_port.as_ref(), &symbols, start_date, end_date);
                format_price_chart(&panel)
            })
            .await
            .map_err(|e| WebError::internal(format!("chart task failed: {}", e)))?
        }
        Recommendation::Unavailable => String::new(),
    };

    let template = ResultTemplate::new(
        &recommendation,
        &profile,
        state.data_port.as_ref(),
        chart_svg,
    );
    render(&template)
}

pub async fn api_suggest(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SuggestRequest>,
) -> Result<Json<SuggestResponse>, ApiError> {
    let profile = parse_profile(
        request.amount,
        &request.risk_profile,
        &request.horizon,
        request.desired_return,
    )?;
    let recommendation = recommend(&state.table, &state.asset_classes, &profile)?;
    Ok(Json(SuggestResponse {
        profile,
        recommendation,
    }))
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "instruments": state.table.len(),
    }))
}

pub async fn not_found() -> WebError {
    WebError::not_found("Page not found")
}

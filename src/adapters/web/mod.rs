//! Web front end: an HTML form plus a JSON endpoint over one shared
//! statistics snapshot.

mod error;
mod handlers;
mod templates;

pub use error::{ApiError, WebError};
pub use handlers::*;
pub use templates::*;

use axum::{
    Router,
    routing::{get, post},
};
use chrono::NaiveDate;
use std::sync::Arc;

use crate::domain::asset_class::AssetClasses;
use crate::domain::stats::StatsTable;
use crate::ports::data_port::DataPort;

/// Read-only state shared by all requests.
pub struct AppState {
    pub table: StatsTable,
    pub asset_classes: AssetClasses,
    pub data_port: Arc<dyn DataPort + Send + Sync>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/suggest", post(handlers::suggest))
        .route("/api/suggest", post(handlers::api_suggest))
        .route("/health", get(handlers::health))
        .fallback(handlers::not_found)
        .with_state(Arc::new(state))
}

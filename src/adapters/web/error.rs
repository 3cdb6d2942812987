//! HTTP error responses for the web adapter.

use askama::Template;
use axum::{
    Json,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::domain::error::AdvisorError;

#[derive(Debug)]
pub struct WebError {
    pub status: StatusCode,
    pub message: String,
}

impl WebError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

pub fn status_from_error(err: &AdvisorError) -> StatusCode {
    match err {
        AdvisorError::ConfigParse { .. }
        | AdvisorError::ConfigMissing { .. }
        | AdvisorError::ConfigInvalid { .. }
        | AdvisorError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
        AdvisorError::NoData { .. } | AdvisorError::EmptySelection => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        AdvisorError::DataFormat { .. }
        | AdvisorError::MalformedTable { .. }
        | AdvisorError::Json(_)
        | AdvisorError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<AdvisorError> for WebError {
    fn from(err: AdvisorError) -> Self {
        tracing::error!(error = %err, "request failed");
        Self::new(status_from_error(&err), err.to_string())
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let template = super::templates::ErrorTemplate {
            message: &self.message,
            status: self.status.as_u16(),
        };
        match template.render() {
            Ok(html) => (self.status, Html(html)).into_response(),
            Err(_) => (self.status, self.message).into_response(),
        }
    }
}

/// JSON flavour of [`WebError`] for the API routes.
#[derive(Debug)]
pub struct ApiError(pub WebError);

impl<E: Into<WebError>> From<E> for ApiError {
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.0.message });
        (self.0.status, Json(body)).into_response()
    }
}

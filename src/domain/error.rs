//! Domain error types.

/// Top-level error type for allocassist.
///
/// Ordinary business outcomes (no eligible instrument, a symbol without
/// enough history) are not errors; they surface as return values from
/// the selector or as silent exclusions from the statistics table.
#[derive(Debug, thiserror::Error)]
pub enum AdvisorError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("invalid {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("no price data for {symbol}: {reason}")]
    NoData { symbol: String, reason: String },

    #[error("malformed price data for {symbol}: {reason}")]
    DataFormat { symbol: String, reason: String },

    #[error("malformed statistics table: {reason}")]
    MalformedTable { reason: String },

    #[error("cannot summarize an empty selection")]
    EmptySelection,

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&AdvisorError> for std::process::ExitCode {
    fn from(err: &AdvisorError) -> Self {
        let code: u8 = match err {
            AdvisorError::Io(_) | AdvisorError::Json(_) => 1,
            AdvisorError::ConfigParse { .. }
            | AdvisorError::ConfigMissing { .. }
            | AdvisorError::ConfigInvalid { .. }
            | AdvisorError::InvalidInput { .. } => 2,
            AdvisorError::NoData { .. } | AdvisorError::DataFormat { .. } => 3,
            AdvisorError::MalformedTable { .. } => 4,
            AdvisorError::EmptySelection => 5,
        };
        std::process::ExitCode::from(code)
    }
}

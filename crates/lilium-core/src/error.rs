use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

pub type Result<T> = std::result::Result<T, LiliumError>;

#[derive(Debug, Error)]
pub enum LiliumError {
    #[error("invalid limit: {0}")]
    InvalidLimit(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("control channel: {0}")]
    Control(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorPayload {
    pub code: String,
    pub message: String,
    pub operation: String,
    pub trace_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

impl LiliumError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidLimit(_) => "INVALID_LIMIT",
            Self::Validation(_) => "VALIDATION_FAILED",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Control(_) => "CONTROL_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::Sqlite(_) => "SQLITE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub(crate) fn mutex_poisoned(name: &str) -> Self {
        Self::Internal(format!("{name} mutex poisoned"))
    }

    pub fn to_payload(&self, operation: impl Into<String>, query: Option<String>) -> ErrorPayload {
        ErrorPayload {
            code: self.code().to_string(),
            message: self.to_string(),
            operation: operation.into(),
            trace_id: Uuid::new_v4().to_string(),
            query,
        }
    }
}

/// Parses a caller-supplied result limit.
///
/// Negative and non-numeric values are rejected rather than clamped so that
/// contract violations surface at the boundary that produced them.
pub fn parse_limit(raw: &str) -> Result<usize> {
    let trimmed = raw.trim();
    let value = trimmed
        .parse::<i64>()
        .map_err(|_| LiliumError::InvalidLimit(format!("'{trimmed}' is not an integer")))?;
    if value < 0 {
        return Err(LiliumError::InvalidLimit(format!(
            "limit must be >= 0, got {value}"
        )));
    }
    usize::try_from(value)
        .map_err(|_| LiliumError::InvalidLimit(format!("limit {value} does not fit in usize")))
}

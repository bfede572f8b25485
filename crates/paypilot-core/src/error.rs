//! Error types for paypilot-core
//!
//! Errors only arise at the data-fetch boundary. The filter/paginate
//! pipeline itself is total and never produces one.

use thiserror::Error;
use serde::{Deserialize, Serialize};

/// Fallback text when a fetch failure carries no message of its own
pub const FETCH_FALLBACK_MESSAGE: &str = "Failed to load transactions";

/// Fallback text for a failed analytics load
pub const ANALYTICS_FALLBACK_MESSAGE: &str = "Failed to load analytics";

/// Stable machine-readable codes, also used in JSON error bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    FetchFailed,
    InvalidData,
    InternalError,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::FetchFailed => "FETCH_FAILED",
            ErrorCode::InvalidData => "INVALID_DATA",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured form of a [`CoreError`] for logs and API bodies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: ErrorCode,
    pub message: String,
    pub retryable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, " ({})", hint)?;
        }
        Ok(())
    }
}

/// How loudly a failure is logged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Expected and retryable, e.g. a flaky upstream
    Warning,
    Error,
    Critical,
}

/// Main error type for paypilot-core
#[derive(Error, Debug, Clone)]
pub enum CoreError {
    #[error("{message}")]
    FetchFailed { message: String },

    #[error("Invalid data: {message}")]
    InvalidData { message: String },

    #[error("Internal error: {message}")]
    InternalError { message: String },
}

impl CoreError {
    /// Build a fetch failure, keeping the cause text when there is one
    pub fn fetch_failed(message: impl Into<String>) -> Self {
        CoreError::FetchFailed { message: message.into() }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::FetchFailed { .. } => ErrorCode::FetchFailed,
            CoreError::InvalidData { .. } => ErrorCode::InvalidData,
            CoreError::InternalError { .. } => ErrorCode::InternalError,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::FetchFailed { .. } => ErrorSeverity::Warning,
            CoreError::InvalidData { .. } => ErrorSeverity::Error,
            CoreError::InternalError { .. } => ErrorSeverity::Critical,
        }
    }

    /// Fetch failures are transient; retrying re-issues the same request
    pub fn is_retryable(&self) -> bool {
        matches!(self, CoreError::FetchFailed { .. })
    }

    /// Message suitable for the error view, with a generic fallback
    pub fn user_message(&self) -> String {
        self.message_or(FETCH_FALLBACK_MESSAGE)
    }

    /// Display text, or `fallback` when the error carries none
    pub fn message_or(&self, fallback: &str) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            fallback.to_string()
        } else {
            message
        }
    }

    pub fn to_details(&self) -> ErrorDetails {
        let hint = match self {
            CoreError::FetchFailed { .. } => Some("try again"),
            CoreError::InvalidData { .. } => Some("the data source returned malformed records"),
            CoreError::InternalError { .. } => None,
        };
        ErrorDetails {
            code: self.code(),
            message: self.user_message(),
            retryable: self.is_retryable(),
            hint: hint.map(str::to_string),
        }
    }
}

pub type CoreResult<T> = Result<T, CoreError>;

/// Where a failure happened
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    pub session_id: Option<String>,
    pub operation: String,
}

impl ErrorContext {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            session_id: None,
            operation: operation.into(),
        }
    }

    pub fn with_session_id(mut self, session_id: String) -> Self {
        self.session_id = Some(session_id);
        self
    }
}

/// Sink for failures surfaced by the view controllers
pub trait ErrorLogger: Send + Sync {
    fn log_error(&self, error: &CoreError, context: &ErrorContext);
}

/// Logs through the `log` facade; retryable failures at warn, the rest at error
#[derive(Debug, Default)]
pub struct DefaultErrorLogger;

impl ErrorLogger for DefaultErrorLogger {
    fn log_error(&self, error: &CoreError, context: &ErrorContext) {
        let level = match error.severity() {
            ErrorSeverity::Warning => log::Level::Warn,
            ErrorSeverity::Error | ErrorSeverity::Critical => log::Level::Error,
        };
        log::log!(
            target: "paypilot::error",
            level,
            "{} during {} (session {})",
            error.to_details(),
            context.operation,
            context.session_id.as_deref().unwrap_or("-")
        );
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::FetchFailed.to_string(), "FETCH_FAILED");
        assert_eq!(ErrorCode::InvalidData.to_string(), "INVALID_DATA");
    }

    #[test]
    fn test_fetch_failed_passes_message_through() {
        let error = CoreError::fetch_failed("Network unreachable");
        assert_eq!(error.to_string(), "Network unreachable");
        assert_eq!(error.user_message(), "Network unreachable");
        assert_eq!(error.code(), ErrorCode::FetchFailed);
        assert!(error.is_retryable());
    }

    #[test]
    fn test_empty_message_falls_back() {
        let error = CoreError::fetch_failed("   ");
        assert_eq!(error.user_message(), FETCH_FALLBACK_MESSAGE);
        assert_eq!(error.message_or(ANALYTICS_FALLBACK_MESSAGE), "Failed to load analytics");
    }

    #[test]
    fn test_severity() {
        assert_eq!(CoreError::fetch_failed("x").severity(), ErrorSeverity::Warning);
        let error = CoreError::InternalError { message: "x".to_string() };
        assert_eq!(error.severity(), ErrorSeverity::Critical);
        assert!(!error.is_retryable());
    }

    #[test]
    fn test_error_details() {
        let details = CoreError::fetch_failed("timeout").to_details();
        assert_eq!(details.code, ErrorCode::FetchFailed);
        assert!(details.retryable);
        assert_eq!(details.hint.as_deref(), Some("try again"));
        assert_eq!(details.to_string(), "[FETCH_FAILED] timeout (try again)");
    }

    #[test]
    fn test_error_context() {
        let context = ErrorContext::new("load_transactions")
            .with_session_id("abc".to_string());
        assert_eq!(context.operation, "load_transactions");
        assert_eq!(context.session_id.as_deref(), Some("abc"));
    }
}

//! Domain-level error type.
//!
//! Transport agnostic: the HTTP adapter maps [`ErrorCode`] variants to status
//! codes and serialises the `{error, message?, details?}` envelope clients
//! see. Services construct these directly; nothing below the domain layer
//! leaks to the wire beyond the short strings recorded here.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Stable machine-readable failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request payload or a path parameter failed validation.
    ValidationFailed,
    /// No authenticated identity on a login-required operation.
    Unauthenticated,
    /// Authenticated but not permitted by ownership or visibility rules.
    Forbidden,
    /// The target resource does not exist.
    NotFound,
    /// The operation conflicts with existing state (duplicate review).
    Conflict,
    /// Persistence or other unexpected failure.
    InternalFailure,
}

/// Error payload carried from services to the transport adapter.
///
/// `error` is the client-facing headline (for example "Recipe not found"),
/// `message` optional supplementary context, and `details` structured data
/// such as per-field validation failures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ErrorDto", into = "ErrorDto")]
pub struct Error {
    code: ErrorCode,
    error: String,
    message: Option<String>,
    details: Option<Value>,
}

impl Error {
    fn new(code: ErrorCode, error: impl Into<String>) -> Self {
        Self {
            code,
            error: error.into(),
            message: None,
            details: None,
        }
    }

    /// Validation failure with itemised per-field details.
    pub fn validation_failed(details: Value) -> Self {
        Self::new(ErrorCode::ValidationFailed, "Validation failed").with_details(details)
    }

    /// Missing or invalid authentication on a login-required operation.
    pub fn unauthenticated(error: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthenticated, error)
    }

    /// Ownership or visibility denial.
    pub fn forbidden(error: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, error)
    }

    /// Target resource absent.
    pub fn not_found(error: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, error)
    }

    /// Conflicting state, e.g. a second review for the same recipe.
    pub fn conflict(error: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, error)
    }

    /// Unexpected failure. `message` is the short operation context shown to
    /// the client ("Failed to create recipe"); never the underlying cause.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalFailure, "Internal server error").with_message(message)
    }

    /// Attach supplementary context shown alongside the headline.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Attach structured details to the error.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Stable failure category.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Client-facing headline.
    pub fn error(&self) -> &str {
        self.error.as_str()
    }

    /// Supplementary context, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Structured details, if any.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{}: {message}", self.error),
            None => f.write_str(&self.error),
        }
    }
}

impl std::error::Error for Error {}

/// Wire shape. `code` travels too so clients can branch without string
/// matching on the headline.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorDto {
    code: ErrorCode,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl From<Error> for ErrorDto {
    fn from(value: Error) -> Self {
        Self {
            code: value.code,
            error: value.error,
            message: value.message,
            details: value.details,
        }
    }
}

impl From<ErrorDto> for Error {
    fn from(value: ErrorDto) -> Self {
        Self {
            code: value.code,
            error: value.error,
            message: value.message,
            details: value.details,
        }
    }
}

/// Convenient result alias for service and handler signatures.
pub type ApiResult<T> = Result<T, Error>;

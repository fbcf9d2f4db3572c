//! Structured errors
//!
//! Errors never crash a widget. They are values that are recovered at the
//! point of the user action and rendered inline next to the input.

use crate::NumberError;
use serde::{Deserialize, Serialize};

/// Standard error codes (machine-readable)
pub mod codes {
    pub const INVALID_NUMBER: &str = "INVALID_NUMBER";
    pub const NON_POSITIVE_VALUE: &str = "NON_POSITIVE_VALUE";
    pub const EXCHANGE_RATE_UNAVAILABLE: &str = "EXCHANGE_RATE_UNAVAILABLE";
    pub const UNKNOWN_UNIT: &str = "UNKNOWN_UNIT";
    pub const UNKNOWN_DIMENSION: &str = "UNKNOWN_DIMENSION";
    pub const INCOMPATIBLE_UNITS: &str = "INCOMPATIBLE_UNITS";
    pub const INVALID_FORMAT: &str = "INVALID_FORMAT";
    pub const UNKNOWN_CURRENCY: &str = "UNKNOWN_CURRENCY";
    pub const UNDEFINED_FUNC: &str = "UNDEFINED_FUNC";
    pub const UNDEFINED_FIELD: &str = "UNDEFINED_FIELD";
    pub const TYPE_ERROR: &str = "TYPE_ERROR";
    pub const ARG_COUNT: &str = "ARG_COUNT";
    pub const ARG_TYPE: &str = "ARG_TYPE";
    pub const INVALID_KEY: &str = "INVALID_KEY";
    pub const INTERNAL: &str = "INTERNAL";
}

/// Severity level of an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The action failed; the previous display is kept
    Error,
    /// The component cannot continue
    Fatal,
}

/// Structured error surfaced to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChronosError {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the input
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,

    /// Extra detail for logs (never needed to act on the error)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    pub severity: Severity,
}

impl ChronosError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion: None,
            detail: None,
            severity: Severity::Error,
        }
    }

    /// Builder: add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Builder: attach diagnostic detail
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Builder: set severity
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn is(&self, code: &str) -> bool {
        self.code == code
    }

    // ========== Common Error Constructors ==========

    pub fn invalid_number(raw: &str) -> Self {
        Self::new(codes::INVALID_NUMBER, format!("Invalid number: '{}'", raw))
            .with_suggestion("Enter a valid numeric value")
    }

    pub fn non_positive(what: &str) -> Self {
        Self::new(codes::NON_POSITIVE_VALUE, format!("{} must be greater than zero", what))
    }

    pub fn exchange_rate_unavailable() -> Self {
        Self::new(codes::EXCHANGE_RATE_UNAVAILABLE, "Exchange rate unavailable")
            .with_suggestion("Try again later")
    }

    pub fn unknown_unit(unit: &str, dimension: &str) -> Self {
        Self::new(codes::UNKNOWN_UNIT, format!("Unknown {} unit: {}", dimension, unit))
            .with_suggestion(format!("Use list_units('{}') for valid units", dimension))
    }

    pub fn unknown_dimension(name: &str) -> Self {
        Self::new(codes::UNKNOWN_DIMENSION, format!("Unknown dimension: {}", name))
            .with_suggestion("Use list_dimensions() for valid dimensions")
    }

    pub fn incompatible_units(from: &str, to: &str) -> Self {
        Self::new(codes::INCOMPATIBLE_UNITS, format!("Cannot convert {} to {}", from, to))
            .with_suggestion("Both units must belong to the same dimension")
    }

    pub fn invalid_format(what: &str, expected: &str) -> Self {
        Self::new(codes::INVALID_FORMAT, format!("Invalid format: '{}'", what))
            .with_suggestion(format!("Expected {}", expected))
    }

    pub fn unknown_currency(code: &str) -> Self {
        Self::new(codes::UNKNOWN_CURRENCY, format!("Unsupported currency: {}", code))
            .with_suggestion("Supported currencies: USD, BRL, EUR")
    }

    pub fn undefined_func(name: &str) -> Self {
        Self::new(codes::UNDEFINED_FUNC, format!("Unknown function: {}", name))
            .with_suggestion("Use list_functions() to list available functions")
    }

    pub fn undefined_field(name: &str) -> Self {
        Self::new(codes::UNDEFINED_FIELD, format!("Undefined field: {}", name))
    }

    pub fn type_error(expected: &str, got: &str) -> Self {
        Self::new(codes::TYPE_ERROR, format!("Expected {}, got {}", expected, got))
    }

    pub fn arg_count(func: &str, expected: usize, got: usize) -> Self {
        Self::new(codes::ARG_COUNT,
            format!("{}() expects {} arguments, got {}", func, expected, got))
            .with_suggestion(format!("Use help('{}') for usage", func))
    }

    pub fn arg_type(func: &str, arg: &str, expected: &str, got: &str) -> Self {
        Self::new(codes::ARG_TYPE,
            format!("{}() argument '{}': expected {}, got {}", func, arg, expected, got))
    }

    pub fn invalid_key(key: &str) -> Self {
        Self::new(codes::INVALID_KEY, format!("Unrecognized key: {}", key))
    }

    pub fn internal(details: impl Into<String>) -> Self {
        Self::new(codes::INTERNAL, format!("Internal error: {}", details.into()))
            .with_suggestion("This is a bug, please report it")
            .with_severity(Severity::Fatal)
    }
}

impl std::fmt::Display for ChronosError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for ChronosError {}

impl From<NumberError> for ChronosError {
    fn from(err: NumberError) -> Self {
        match err {
            NumberError::ParseError(raw) | NumberError::NotFinite(raw) => Self::invalid_number(&raw),
        }
    }
}

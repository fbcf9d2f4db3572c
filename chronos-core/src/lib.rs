//! Chronos Core - Fundamental types
//!
//! This crate provides the core types used throughout Chronos:
//! - `Value`: Runtime values (numbers, text, objects, errors)
//! - `ChronosError`: Structured errors rendered inline by callers
//! - number parsing and rendering with browser-compatible semantics
//! - `FormatPolicy`: fixed or magnitude-adaptive display precision

mod error;
mod format;
pub mod number;
mod value;

pub use error::{codes, ChronosError, Severity};
pub use format::FormatPolicy;
pub use number::{parse_finite, parse_float, to_exponential, to_fixed, to_js_string, NumberError};
pub use value::Value;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::codes;
    pub use crate::{ChronosError, FormatPolicy, Severity, Value};
}

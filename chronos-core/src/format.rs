//! Display precision policies for converted values

use crate::number::{to_exponential, to_fixed};
use serde::{Deserialize, Serialize};

/// How a result is rendered for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "lowercase")]
pub enum FormatPolicy {
    /// Always `digits` fractional digits
    Fixed { digits: usize },

    /// Precision chosen from the magnitude of the value
    Adaptive,
}

impl FormatPolicy {
    pub const fn fixed(digits: usize) -> Self {
        FormatPolicy::Fixed { digits }
    }

    pub fn format(&self, value: f64) -> String {
        match self {
            FormatPolicy::Fixed { digits } => to_fixed(value, *digits),
            FormatPolicy::Adaptive => format_adaptive(value),
        }
    }
}

/// Scientific outside [0.0001, 1e6], otherwise more decimals for small values.
fn format_adaptive(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude < 0.0001 || magnitude > 1e6 {
        to_exponential(value, 6)
    } else if magnitude < 0.1 {
        to_fixed(value, 6)
    } else if magnitude < 100.0 {
        to_fixed(value, 4)
    } else {
        to_fixed(value, 2)
    }
}

//! Chronos Calculator
//!
//! A four-function calculator driven one key press at a time, the way a
//! keypad or keyboard drives it:
//! - digits, decimal separator, `+ - × ÷`, equals
//! - square root, percent, clear, delete
//! - a pending-expression line (`"12 +"`) while an operator waits

mod calculator;
mod functions;
mod key;

pub use calculator::{Calculator, ERROR_TOKEN};
pub use key::{Key, Operator};

use chronos_plugin::PluginRegistry;

/// Load calculator functions into registry
pub fn load_calc_library(registry: PluginRegistry) -> PluginRegistry {
    registry.with_function(functions::Calculate)
}

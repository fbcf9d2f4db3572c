//! Chronos Health Functions Plugin
//!
//! Body mass index from weight (kg) and height (m), with the six-band
//! adult classification.

mod bmi;

pub use bmi::{classify_bmi, classify_bmi_raw, BmiError, BmiReport, Classification};

use chronos_plugin::PluginRegistry;

/// Load health functions into registry
pub fn load_health_library(registry: PluginRegistry) -> PluginRegistry {
    registry.with_function(bmi::Bmi)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_health_library() {
        let registry = load_health_library(PluginRegistry::new());
        assert!(registry.get_function("bmi").is_some());
    }
}

//! Chronos Units - unit conversion engine
//!
//! Ten dimensions, each with an immutable table of units routed through a
//! base unit:
//! - Length (m, km, ft, mi, ri, fathom, ...) - adaptive display
//! - Pressure (Pa, bar, psi, atm, mmHg, ...) - adaptive display
//! - Weight, Energy, Area, Volume, Speed, Force, Time - 4 decimals
//! - Temperature (°C, °F, K) - affine rules, 2 decimals

mod convert;
mod dimension;
mod functions;
mod parse;
mod tables;
mod unit;

pub use convert::{convert, convert_value, from_base, to_base, ConversionError, ConversionRequest, ConversionResult};
pub use dimension::Dimension;
pub use parse::{dimensions_of, parse_conversion, resolve_pair, resolve_unit};
pub use tables::DimensionTable;
pub use unit::{Rule, UnitDef};

use chronos_plugin::PluginRegistry;

/// Load unit functions into registry
pub fn load_units_library(registry: PluginRegistry) -> PluginRegistry {
    registry
        .with_function(functions::Convert)
        .with_function(functions::ToBase)
        .with_function(functions::ListUnits)
        .with_function(functions::ListDimensions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chronos_core::Value;

    #[test]
    fn test_load_units_library() {
        let registry = load_units_library(PluginRegistry::new());
        assert!(registry.get_function("convert").is_some());
        assert!(registry.get_function("to_base").is_some());
        assert!(registry.get_function("list_units").is_some());
        assert!(registry.get_function("list_dimensions").is_some());
    }

    #[test]
    fn test_convert_through_registry() {
        let registry = load_units_library(PluginRegistry::new());
        let result = registry.call_function(
            "convert",
            &[Value::Text("1".into()), Value::Text("meter".into()), Value::Text("foot".into())],
        );
        assert_eq!(result.get("formatted"), Value::Text("3.2808".into()));
    }
}

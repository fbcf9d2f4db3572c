//! Conversion engine
//!
//! Every conversion routes through the dimension's base unit: the input is
//! parsed, mapped to the base with the source unit's rule, mapped back out
//! with the target unit's rule and rendered with the dimension's policy.

use crate::parse::resolve_unit;
use crate::tables::DimensionTable;
use crate::unit::UnitDef;
use crate::Dimension;
use chronos_core::{parse_finite, ChronosError, NumberError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while resolving or converting
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    #[error("invalid number: '{0}'")]
    InvalidNumber(String),

    #[error("unknown {dimension} unit: {unit}")]
    UnknownUnit { unit: String, dimension: Dimension },

    #[error("unrecognized unit: {0}")]
    UnrecognizedUnit(String),

    #[error("unknown dimension: {0}")]
    UnknownDimension(String),

    #[error("cannot convert {from} to {to}: different dimensions")]
    IncompatibleUnits { from: String, to: String },

    #[error("invalid conversion format: '{0}', expected 'unit1->unit2'")]
    InvalidFormat(String),
}

impl From<NumberError> for ConversionError {
    fn from(err: NumberError) -> Self {
        match err {
            NumberError::ParseError(raw) | NumberError::NotFinite(raw) => ConversionError::InvalidNumber(raw),
        }
    }
}

impl From<ConversionError> for ChronosError {
    fn from(err: ConversionError) -> Self {
        match err {
            ConversionError::InvalidNumber(raw) => ChronosError::invalid_number(&raw),
            ConversionError::UnknownUnit { unit, dimension } => {
                ChronosError::unknown_unit(&unit, dimension.name())
            }
            ConversionError::UnrecognizedUnit(unit) => {
                ChronosError::new(chronos_core::codes::UNKNOWN_UNIT, format!("Unrecognized unit: {}", unit))
                    .with_suggestion("Use list_units(dimension) for valid units")
            }
            ConversionError::UnknownDimension(name) => ChronosError::unknown_dimension(&name),
            ConversionError::IncompatibleUnits { from, to } => ChronosError::incompatible_units(&from, &to),
            ConversionError::InvalidFormat(text) => ChronosError::invalid_format(&text, "'unit1->unit2'"),
        }
    }
}

/// One user-initiated conversion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRequest {
    pub dimension: Dimension,
    pub from: String,
    pub to: String,
    pub raw_input: String,
}

impl ConversionRequest {
    pub fn new(dimension: Dimension, from: impl Into<String>, to: impl Into<String>, raw_input: impl Into<String>) -> Self {
        Self {
            dimension,
            from: from.into(),
            to: to.into(),
            raw_input: raw_input.into(),
        }
    }

    /// Request preloaded with the dimension's default unit pair
    pub fn with_defaults(dimension: Dimension, raw_input: impl Into<String>) -> Self {
        let table = dimension.table();
        Self::new(dimension, table.default_from, table.default_to, raw_input)
    }

    pub fn execute(&self) -> Result<ConversionResult, ConversionError> {
        convert(self.dimension, &self.from, &self.to, &self.raw_input)
    }
}

/// Converted value and its display rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionResult {
    pub value: f64,
    pub formatted: String,
}

/// Convert `raw_input` between two units of `dimension`, resolving units from text.
pub fn convert(dimension: Dimension, from: &str, to: &str, raw_input: &str) -> Result<ConversionResult, ConversionError> {
    let value = parse_finite(raw_input)?;
    let from_unit = resolve_unit(dimension, from)?;
    let to_unit = resolve_unit(dimension, to)?;
    Ok(convert_value(dimension.table(), from_unit, to_unit, value))
}

/// Convert an already parsed value with units taken from `table`.
pub fn convert_value(table: &DimensionTable, from: &UnitDef, to: &UnitDef, value: f64) -> ConversionResult {
    let base = from.to_base(value);
    let result = to.from_base(base);
    let formatted = table.policy.format(result);

    tracing::debug!(
        dimension = %table.dimension,
        from = from.id,
        to = to.id,
        value,
        result,
        "converted"
    );

    ConversionResult { value: result, formatted }
}

/// Value expressed in the dimension's base unit
pub fn to_base(dimension: Dimension, unit: &str, value: f64) -> Result<f64, ConversionError> {
    Ok(resolve_unit(dimension, unit)?.to_base(value))
}

/// Base-unit value expressed in `unit`
pub fn from_base(dimension: Dimension, unit: &str, value: f64) -> Result<f64, ConversionError> {
    Ok(resolve_unit(dimension, unit)?.from_base(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn formatted(dim: Dimension, from: &str, to: &str, raw: &str) -> String {
        convert(dim, from, to, raw).unwrap().formatted
    }

    #[test]
    fn test_meter_to_foot() {
        assert_eq!(formatted(Dimension::Length, "meter", "foot", "1"), "3.2808");
    }

    #[test]
    fn test_celsius_to_fahrenheit() {
        assert_eq!(formatted(Dimension::Temperature, "celsius", "fahrenheit", "0"), "32.00");
        assert_eq!(formatted(Dimension::Temperature, "fahrenheit", "celsius", "212"), "100.00");
        assert_eq!(formatted(Dimension::Temperature, "kelvin", "celsius", "0"), "-273.15");
    }

    #[test]
    fn test_kilogram_to_pound() {
        assert_eq!(formatted(Dimension::Weight, "kilogram", "pound", "1"), "2.2046");
    }

    #[test]
    fn test_divisor_units() {
        assert_eq!(formatted(Dimension::Weight, "gram", "kilogram", "1500"), "1.5000");
        assert_eq!(formatted(Dimension::Speed, "kilometer_per_hour", "meter_per_second", "36"), "10.0000");
        assert_eq!(formatted(Dimension::Time, "second", "millisecond", "2"), "2000.0000");
    }

    #[test]
    fn test_adaptive_length_bands() {
        assert_eq!(formatted(Dimension::Length, "kilometer", "meter", "5"), "5000.00");
        assert_eq!(formatted(Dimension::Length, "millimeter", "meter", "5"), "0.005000");
        assert_eq!(formatted(Dimension::Length, "mile", "millimeter", "1000"), "1.609340e+9");
    }

    #[test]
    fn test_adaptive_pressure() {
        assert_eq!(formatted(Dimension::Pressure, "pa", "bar", "250000"), "2.5000");
        assert_eq!(formatted(Dimension::Pressure, "pa", "bar", "5000"), "0.050000");
        assert_eq!(formatted(Dimension::Pressure, "pa", "bar", "1"), "1.000000e-5");
        assert_eq!(formatted(Dimension::Pressure, "pa", "mpa", "1"), "1.000000e-6");
    }

    #[test]
    fn test_fixed_does_not_switch_to_exponential() {
        assert_eq!(formatted(Dimension::Energy, "electronvolt", "joule", "1"), "0.0000");
        assert_eq!(formatted(Dimension::Time, "millennium", "second", "1"), "31557600000.0000");
    }

    #[test]
    fn test_parse_float_prefix_input() {
        assert_eq!(formatted(Dimension::Weight, "kilogram", "gram", " 2.5kg"), "2500.0000");
    }

    #[test]
    fn test_negative_input_is_not_rejected() {
        assert_eq!(formatted(Dimension::Length, "meter", "foot", "-1"), "-3.2808");
        assert_eq!(formatted(Dimension::Temperature, "kelvin", "celsius", "-10"), "-283.15");
    }

    #[test]
    fn test_invalid_number_in_every_dimension() {
        for dim in Dimension::ALL {
            let table = dim.table();
            let result = convert(dim, table.default_from, table.default_to, "abc");
            assert_eq!(result, Err(ConversionError::InvalidNumber("abc".to_string())), "{}", dim);
        }
    }

    #[test]
    fn test_non_finite_input_rejected() {
        assert!(matches!(
            convert(Dimension::Length, "meter", "foot", "Infinity"),
            Err(ConversionError::InvalidNumber(_))
        ));
        assert!(matches!(
            convert(Dimension::Length, "meter", "foot", ""),
            Err(ConversionError::InvalidNumber(_))
        ));
    }

    #[test]
    fn test_unknown_unit() {
        let err = convert(Dimension::Length, "meter", "parsec", "1").unwrap_err();
        assert_eq!(
            err,
            ConversionError::UnknownUnit { unit: "parsec".to_string(), dimension: Dimension::Length }
        );
    }

    #[test]
    fn test_round_trip_every_pair() {
        let samples = [0.5, 1.0, 42.0, 1234.5];
        for dim in Dimension::ALL {
            let table = dim.table();
            for from in table.units {
                for to in table.units {
                    for &x in &samples {
                        let there = convert_value(table, from, to, x).value;
                        let back = convert_value(table, to, from, there).value;
                        let tolerance = 1e-9 * x.abs().max(1.0);
                        assert!(
                            (back - x).abs() <= tolerance,
                            "{}: {} -> {} -> {} gave {} for {}",
                            dim, from.id, to.id, from.id, back, x
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_to_and_from_base() {
        assert_eq!(to_base(Dimension::Length, "km", 5.0).unwrap(), 5000.0);
        assert!((to_base(Dimension::Temperature, "C", 100.0).unwrap() - 373.15).abs() < 1e-9);
        assert!((from_base(Dimension::Temperature, "F", 273.15).unwrap() - 32.0).abs() < 1e-9);
    }

    #[test]
    fn test_request_defaults() {
        let result = ConversionRequest::with_defaults(Dimension::Temperature, "100").execute().unwrap();
        assert_eq!(result.formatted, "212.00");
    }

    #[test]
    fn test_into_chronos_error() {
        let err: ChronosError = ConversionError::InvalidNumber("x".into()).into();
        assert!(err.is(chronos_core::codes::INVALID_NUMBER));
        let err: ChronosError = ConversionError::IncompatibleUnits { from: "m".into(), to: "kg".into() }.into();
        assert!(err.is(chronos_core::codes::INCOMPATIBLE_UNITS));
    }
}

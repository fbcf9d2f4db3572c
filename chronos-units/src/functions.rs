//! Unit conversion functions for the plugin registry

use chronos_core::{parse_finite, ChronosError, FormatPolicy, Value};
use chronos_plugin::helpers::{extract_number, extract_optional_text, extract_raw_input, extract_text};
use chronos_plugin::{ArgMeta, FunctionMeta, FunctionPlugin};

use crate::convert::{convert_value, ConversionError};
use crate::parse::{parse_conversion, resolve_pair, resolve_unit};
use crate::tables::DimensionTable;
use crate::unit::UnitDef;
use crate::Dimension;

/// Units named in the call, with the dimension given or inferred.
fn resolve_units(
    from: &str,
    to: &str,
    dimension: Option<&str>,
) -> Result<(Dimension, &'static UnitDef, &'static UnitDef), ConversionError> {
    match dimension {
        Some(name) => {
            let dim: Dimension = name.parse()?;
            Ok((dim, resolve_unit(dim, from)?, resolve_unit(dim, to)?))
        }
        None => resolve_pair(from, to),
    }
}

fn unit_to_value(unit: &UnitDef) -> Value {
    Value::object([
        ("id", Value::Text(unit.id.to_string())),
        ("symbol", Value::Text(unit.symbol.to_string())),
        ("name", Value::Text(unit.name.to_string())),
    ])
}

fn table_to_value(table: &DimensionTable) -> Value {
    let policy = match table.policy {
        FormatPolicy::Fixed { digits } => format!("fixed({})", digits),
        FormatPolicy::Adaptive => "adaptive".to_string(),
    };
    Value::object([
        ("name", Value::Text(table.dimension.name().to_string())),
        ("base", Value::Text(table.base.to_string())),
        ("format", Value::Text(policy)),
        ("default_from", Value::Text(table.default_from.to_string())),
        ("default_to", Value::Text(table.default_to.to_string())),
        ("units", Value::Number(table.units.len() as f64)),
    ])
}

// ============ convert ============

pub struct Convert;

static CONVERT_ARGS: [ArgMeta; 4] = [
    ArgMeta::required("value", "Text", "Raw input, parsed like a form field (\"12.5\", \"3kg\")"),
    ArgMeta::required("from_unit", "Text", "Source unit, or a pair like \"m->ft\""),
    ArgMeta::optional("to_unit", "Text", "Target unit", "(from pair)"),
    ArgMeta::optional("dimension", "Text", "Dimension to resolve units in", "(inferred)"),
];

static CONVERT_EXAMPLES: [&str; 4] = [
    "convert(\"1\", \"meter\", \"foot\") → {value: 3.28..., formatted: \"3.2808\"}",
    "convert(\"0\", \"C\", \"F\") → {formatted: \"32.00\"}",
    "convert(\"1\", \"kg->lb\") → {formatted: \"2.2046\"}",
    "convert(\"1\", \"c\", \"mph\", \"speed\") → {formatted: \"670616629.3844\"}",
];

static CONVERT_RELATED: [&str; 3] = ["to_base", "list_units", "list_dimensions"];

impl FunctionPlugin for Convert {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "convert",
            description: "Convert a value between two units of the same dimension",
            usage: "convert(value, from_unit, to_unit, [dimension]) or convert(value, \"from->to\")",
            args: &CONVERT_ARGS,
            returns: "Object {value, formatted, from, to, dimension}",
            examples: &CONVERT_EXAMPLES,
            category: "units",
            related: &CONVERT_RELATED,
        }
    }

    fn call(&self, args: &[Value]) -> Value {
        if args.len() < 2 || args.len() > 4 {
            return Value::Error(ChronosError::arg_count("convert", 3, args.len()));
        }

        let raw = match extract_raw_input(&args[0], "convert", "value") {
            Ok(s) => s,
            Err(e) => return Value::Error(e),
        };

        let first = match extract_text(&args[1], "convert", "from_unit") {
            Ok(s) => s,
            Err(e) => return Value::Error(e),
        };

        let value = match parse_finite(&raw) {
            Ok(v) => v,
            Err(e) => return Value::Error(e.into()),
        };

        let resolved = if args.len() == 2 {
            parse_conversion(&first)
        } else {
            let to = match extract_text(&args[2], "convert", "to_unit") {
                Ok(s) => s,
                Err(e) => return Value::Error(e),
            };
            resolve_units(&first, &to, extract_optional_text(args, 3).as_deref())
        };

        let (dim, from, to) = match resolved {
            Ok(r) => r,
            Err(e) => return Value::Error(e.into()),
        };

        let result = convert_value(dim.table(), from, to, value);
        Value::object([
            ("value", Value::Number(result.value)),
            ("formatted", Value::Text(result.formatted)),
            ("from", Value::Text(from.id.to_string())),
            ("to", Value::Text(to.id.to_string())),
            ("dimension", Value::Text(dim.name().to_string())),
        ])
    }
}

// ============ to_base ============

pub struct ToBase;

static TO_BASE_ARGS: [ArgMeta; 3] = [
    ArgMeta::required("value", "Number", "Value to convert"),
    ArgMeta::required("unit", "Text", "Source unit"),
    ArgMeta::optional("dimension", "Text", "Dimension to resolve the unit in", "(inferred)"),
];

static TO_BASE_EXAMPLES: [&str; 2] = [
    "to_base(5, \"km\") → 5000",
    "to_base(100, \"celsius\") → 373.15",
];

static TO_BASE_RELATED: [&str; 2] = ["convert", "list_dimensions"];

impl FunctionPlugin for ToBase {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "to_base",
            description: "Express a value in its dimension's base unit",
            usage: "to_base(value, unit, [dimension])",
            args: &TO_BASE_ARGS,
            returns: "Number",
            examples: &TO_BASE_EXAMPLES,
            category: "units",
            related: &TO_BASE_RELATED,
        }
    }

    fn call(&self, args: &[Value]) -> Value {
        if args.len() < 2 {
            return Value::Error(ChronosError::arg_count("to_base", 2, args.len()));
        }

        let value = match extract_number(&args[0], "to_base", "value") {
            Ok(n) => n,
            Err(e) => return Value::Error(e),
        };

        let unit_str = match extract_text(&args[1], "to_base", "unit") {
            Ok(s) => s,
            Err(e) => return Value::Error(e),
        };

        // A unit paired with itself pins down its dimension
        match resolve_units(&unit_str, &unit_str, extract_optional_text(args, 2).as_deref()) {
            Ok((_, unit, _)) => Value::Number(unit.to_base(value)),
            Err(e) => Value::Error(e.into()),
        }
    }
}

// ============ list_units ============

pub struct ListUnits;

static LIST_UNITS_ARGS: [ArgMeta; 1] = [
    ArgMeta::required("dimension", "Text", "length, weight, temperature, pressure, energy, area, volume, speed, force or time"),
];

static LIST_UNITS_EXAMPLES: [&str; 1] = [
    "list_units(\"temperature\") → [{id: \"celsius\", symbol: \"°C\", ...}, ...]",
];

static LIST_UNITS_RELATED: [&str; 2] = ["list_dimensions", "convert"];

impl FunctionPlugin for ListUnits {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "list_units",
            description: "List the units of a dimension",
            usage: "list_units(dimension)",
            args: &LIST_UNITS_ARGS,
            returns: "List of Object {id, symbol, name}",
            examples: &LIST_UNITS_EXAMPLES,
            category: "units",
            related: &LIST_UNITS_RELATED,
        }
    }

    fn call(&self, args: &[Value]) -> Value {
        if args.is_empty() {
            return Value::Error(ChronosError::arg_count("list_units", 1, 0));
        }

        let name = match extract_text(&args[0], "list_units", "dimension") {
            Ok(s) => s,
            Err(e) => return Value::Error(e),
        };

        match name.parse::<Dimension>() {
            Ok(dim) => Value::List(dim.table().units.iter().map(unit_to_value).collect()),
            Err(e) => Value::Error(e.into()),
        }
    }
}

// ============ list_dimensions ============

pub struct ListDimensions;

static LIST_DIMENSIONS_EXAMPLES: [&str; 1] = [
    "list_dimensions() → [{name: \"length\", base: \"meter\", format: \"adaptive\", ...}, ...]",
];

static LIST_DIMENSIONS_RELATED: [&str; 1] = ["list_units"];

impl FunctionPlugin for ListDimensions {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "list_dimensions",
            description: "List dimensions with base unit, display format and default unit pair",
            usage: "list_dimensions()",
            args: &[],
            returns: "List of Object {name, base, format, default_from, default_to, units}",
            examples: &LIST_DIMENSIONS_EXAMPLES,
            category: "units",
            related: &LIST_DIMENSIONS_RELATED,
        }
    }

    fn call(&self, _args: &[Value]) -> Value {
        Value::List(Dimension::ALL.iter().map(|d| table_to_value(d.table())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chronos_core::codes;

    fn text(s: &str) -> Value {
        Value::Text(s.to_string())
    }

    #[test]
    fn test_convert_three_args() {
        let result = Convert.call(&[text("1"), text("meter"), text("foot")]);
        assert_eq!(result.get("formatted"), text("3.2808"));
        assert_eq!(result.get("dimension"), text("length"));
    }

    #[test]
    fn test_convert_accepts_number_input() {
        let result = Convert.call(&[Value::Number(1.0), text("kg"), text("lb")]);
        assert_eq!(result.get("formatted"), text("2.2046"));
    }

    #[test]
    fn test_convert_pair_form() {
        let result = Convert.call(&[text("0"), text("C->F")]);
        assert_eq!(result.get("formatted"), text("32.00"));
    }

    #[test]
    fn test_convert_explicit_dimension() {
        let result = Convert.call(&[text("1"), text("c"), text("mph"), text("speed")]);
        assert_eq!(result.get("from"), text("light_speed"));
        let err = Convert.call(&[text("1"), text("meter"), text("foot"), text("weight")]);
        assert!(err.as_error().unwrap().is(codes::UNKNOWN_UNIT));
    }

    #[test]
    fn test_convert_invalid_number() {
        let result = Convert.call(&[text("abc"), text("meter"), text("foot")]);
        assert!(result.as_error().unwrap().is(codes::INVALID_NUMBER));
    }

    #[test]
    fn test_convert_incompatible() {
        let result = Convert.call(&[text("1"), text("meter"), text("kg")]);
        assert!(result.as_error().unwrap().is(codes::INCOMPATIBLE_UNITS));
    }

    #[test]
    fn test_convert_arg_count() {
        let result = Convert.call(&[text("1")]);
        assert!(result.as_error().unwrap().is(codes::ARG_COUNT));
    }

    #[test]
    fn test_to_base() {
        assert_eq!(ToBase.call(&[Value::Number(5.0), text("km")]), Value::Number(5000.0));
        let kelvin = ToBase.call(&[Value::Number(100.0), text("celsius")]).as_number().unwrap();
        assert!((kelvin - 373.15).abs() < 1e-9);
    }

    #[test]
    fn test_list_units() {
        let units = ListUnits.call(&[text("temperature")]);
        assert_eq!(units.as_list().map(|l| l.len()), Some(3));
        assert!(ListUnits.call(&[text("colour")]).is_error());
    }

    #[test]
    fn test_list_dimensions() {
        let dims = ListDimensions.call(&[]);
        let list = dims.as_list().unwrap();
        assert_eq!(list.len(), 10);
        assert_eq!(list[0].get("format"), text("adaptive"));
        assert_eq!(list[1].get("format"), text("fixed(4)"));
    }
}

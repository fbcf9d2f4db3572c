//! Calculator function for the plugin registry

use chronos_core::{ChronosError, Value};
use chronos_plugin::helpers::{extract_optional_text, extract_text};
use chronos_plugin::{ArgMeta, FunctionMeta, FunctionPlugin};

use crate::{Calculator, Key};

// ============ calculate ============

pub struct Calculate;

static CALCULATE_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("keys", "Text", "Key presses, e.g. \"5+3=\" or \"9 sqrt\""),
    ArgMeta::optional("separator", "Text", "Decimal separator, \".\" or \",\"", "."),
];

static CALCULATE_EXAMPLES: [&str; 4] = [
    "calculate(\"5+3=\") → {display: \"8\"}",
    "calculate(\"5÷0=\") → {display: \"0\"}",
    "calculate(\"200+10%\") → {display: \"20\", expression: \"200 +\"}",
    "calculate(\"7/2=\", \",\") → {display: \"3,5\"}",
];

static CALCULATE_RELATED: [&str; 1] = ["convert"];

impl FunctionPlugin for Calculate {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "calculate",
            description: "Run key presses through a fresh four-function calculator",
            usage: "calculate(keys, [separator])",
            args: &CALCULATE_ARGS,
            returns: "Object {display, expression, accumulator, operator}",
            examples: &CALCULATE_EXAMPLES,
            category: "calculator",
            related: &CALCULATE_RELATED,
        }
    }

    fn call(&self, args: &[Value]) -> Value {
        if args.is_empty() || args.len() > 2 {
            return Value::Error(ChronosError::arg_count("calculate", 1, args.len()));
        }

        let text = match extract_text(&args[0], "calculate", "keys") {
            Ok(s) => s,
            Err(e) => return Value::Error(e),
        };

        let separator = match extract_optional_text(args, 1).as_deref() {
            None | Some(".") => '.',
            Some(",") => ',',
            Some(other) => {
                return Value::Error(ChronosError::invalid_format(other, "\".\" or \",\""));
            }
        };

        let keys = match Key::parse_sequence(&text) {
            Ok(k) => k,
            Err(e) => return Value::Error(e),
        };

        let mut calc = Calculator::new().with_decimal_separator(separator);
        calc.press_all(keys);
        calculator_to_value(&calc)
    }
}

/// Snapshot of the calculator's visible state
fn calculator_to_value(calc: &Calculator) -> Value {
    Value::object([
        ("display", Value::Text(calc.display().to_string())),
        (
            "expression",
            calc.pending_expression().map(Value::Text).unwrap_or(Value::Null),
        ),
        (
            "accumulator",
            calc.accumulator().map(Value::Number).unwrap_or(Value::Null),
        ),
        (
            "operator",
            calc.pending_operator()
                .map(|op| Value::Text(op.symbol().to_string()))
                .unwrap_or(Value::Null),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chronos_core::codes;

    fn call(args: &[&str]) -> Value {
        let args: Vec<Value> = args.iter().map(|s| Value::Text(s.to_string())).collect();
        Calculate.call(&args)
    }

    #[test]
    fn test_calculate() {
        assert_eq!(call(&["5+3="]).get("display"), Value::Text("8".into()));
        assert_eq!(call(&["5÷0="]).get("display"), Value::Text("0".into()));
    }

    #[test]
    fn test_pending_state_reported() {
        let result = call(&["200+10%"]);
        assert_eq!(result.get("expression"), Value::Text("200 +".into()));
        assert_eq!(result.get("accumulator"), Value::Number(200.0));
        assert_eq!(result.get("operator"), Value::Text("+".into()));
    }

    #[test]
    fn test_separator_argument() {
        assert_eq!(call(&["7/2=", ","]).get("display"), Value::Text("3,5".into()));
        assert!(call(&["7/2=", ";"]).as_error().unwrap().is(codes::INVALID_FORMAT));
    }

    #[test]
    fn test_invalid_key() {
        assert!(call(&["5&3"]).as_error().unwrap().is(codes::INVALID_KEY));
    }
}

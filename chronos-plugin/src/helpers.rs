//! Argument extraction shared by the tool crates

use chronos_core::{to_js_string, ChronosError, Value};

/// Extract a raw numeric input as the text a form field would hold.
///
/// Numbers are rendered back to their shortest form so that both
/// `convert(1, ...)` and `convert("1", ...)` go through the same parser.
pub fn extract_raw_input(value: &Value, func: &str, arg: &str) -> Result<String, ChronosError> {
    match value {
        Value::Text(s) => Ok(s.clone()),
        Value::Number(n) => Ok(to_js_string(*n)),
        Value::Error(e) => Err(e.clone()),
        other => Err(ChronosError::arg_type(func, arg, "Text or Number", other.type_name())),
    }
}

/// Extract a Number from a Value
pub fn extract_number(value: &Value, func: &str, arg: &str) -> Result<f64, ChronosError> {
    match value {
        Value::Number(n) => Ok(*n),
        Value::Error(e) => Err(e.clone()),
        other => Err(ChronosError::arg_type(func, arg, "Number", other.type_name())),
    }
}

/// Extract a Text string from a Value
pub fn extract_text(value: &Value, func: &str, arg: &str) -> Result<String, ChronosError> {
    match value {
        Value::Text(s) => Ok(s.clone()),
        Value::Error(e) => Err(e.clone()),
        other => Err(ChronosError::arg_type(func, arg, "Text", other.type_name())),
    }
}

/// Extract optional Text string (may be missing or null)
pub fn extract_optional_text(args: &[Value], index: usize) -> Option<String> {
    args.get(index).and_then(|v| match v {
        Value::Text(s) => Some(s.clone()),
        _ => None,
    })
}

/// Check arity, returning the standard error
pub fn expect_args(args: &[Value], func: &str, min: usize, max: usize) -> Result<(), ChronosError> {
    if args.len() < min || args.len() > max {
        return Err(ChronosError::arg_count(func, min, args.len()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_raw_input() {
        assert_eq!(extract_raw_input(&Value::Text("12kg".into()), "f", "a").unwrap(), "12kg");
        assert_eq!(extract_raw_input(&Value::Number(1.5), "f", "a").unwrap(), "1.5");
        assert!(extract_raw_input(&Value::Bool(true), "f", "a").is_err());
    }

    #[test]
    fn test_extract_number_passes_errors_through() {
        let err = ChronosError::invalid_number("x");
        let result = extract_number(&Value::Error(err.clone()), "f", "a");
        assert_eq!(result, Err(err));
    }

    #[test]
    fn test_expect_args() {
        let args = vec![Value::Null, Value::Null];
        assert!(expect_args(&args, "f", 2, 3).is_ok());
        assert!(expect_args(&args, "f", 3, 3).is_err());
    }
}

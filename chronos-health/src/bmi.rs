//! BMI calculation and classification

use chronos_core::{parse_finite, to_fixed, ChronosError, Value};
use chronos_plugin::helpers::extract_raw_input;
use chronos_plugin::{ArgMeta, FunctionMeta, FunctionPlugin};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BmiError {
    #[error("{field}: invalid number '{raw}'")]
    InvalidNumber { field: &'static str, raw: String },

    #[error("{field} must be greater than zero")]
    NonPositive { field: &'static str },
}

impl From<BmiError> for ChronosError {
    fn from(err: BmiError) -> Self {
        match err {
            BmiError::InvalidNumber { raw, .. } => ChronosError::invalid_number(&raw),
            BmiError::NonPositive { field } => ChronosError::non_positive(field),
        }
    }
}

/// Adult BMI band, lower bound inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Underweight,
    Normal,
    Overweight,
    ObesityI,
    ObesityII,
    ObesityIII,
}

impl Classification {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            Classification::Underweight
        } else if bmi < 25.0 {
            Classification::Normal
        } else if bmi < 30.0 {
            Classification::Overweight
        } else if bmi < 35.0 {
            Classification::ObesityI
        } else if bmi < 40.0 {
            Classification::ObesityII
        } else {
            Classification::ObesityIII
        }
    }

    /// Machine-readable name
    pub fn key(&self) -> &'static str {
        match self {
            Classification::Underweight => "underweight",
            Classification::Normal => "normal",
            Classification::Overweight => "overweight",
            Classification::ObesityI => "obesity_i",
            Classification::ObesityII => "obesity_ii",
            Classification::ObesityIII => "obesity_iii",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Classification::Underweight => "Underweight",
            Classification::Normal => "Normal weight",
            Classification::Overweight => "Overweight",
            Classification::ObesityI => "Obesity class I",
            Classification::ObesityII => "Obesity class II",
            Classification::ObesityIII => "Obesity class III",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmiReport {
    pub bmi: f64,
    /// Two decimals
    pub formatted: String,
    pub classification: Classification,
}

/// `weight / height²`, both finite and strictly positive
pub fn classify_bmi(weight_kg: f64, height_m: f64) -> Result<BmiReport, BmiError> {
    for (field, value) in [("weight", weight_kg), ("height", height_m)] {
        if !value.is_finite() {
            return Err(BmiError::InvalidNumber { field, raw: value.to_string() });
        }
    }
    if weight_kg <= 0.0 {
        return Err(BmiError::NonPositive { field: "weight" });
    }
    if height_m <= 0.0 {
        return Err(BmiError::NonPositive { field: "height" });
    }

    let bmi = weight_kg / (height_m * height_m);
    let report = BmiReport {
        bmi,
        formatted: to_fixed(bmi, 2),
        classification: Classification::from_bmi(bmi),
    };
    tracing::debug!(bmi, classification = %report.classification, "bmi classified");
    Ok(report)
}

/// Parse both fields first, then validate; an unparseable field wins over a
/// non-positive one.
pub fn classify_bmi_raw(weight: &str, height: &str) -> Result<BmiReport, BmiError> {
    let parse = |field: &'static str, raw: &str| {
        parse_finite(raw).map_err(|_| BmiError::InvalidNumber { field, raw: raw.to_string() })
    };
    let weight_kg = parse("weight", weight)?;
    let height_m = parse("height", height)?;
    classify_bmi(weight_kg, height_m)
}

// ============ bmi ============

pub struct Bmi;

static BMI_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("weight", "Text", "Weight in kilograms"),
    ArgMeta::required("height", "Text", "Height in meters"),
];

static BMI_EXAMPLES: [&str; 2] = [
    "bmi(70, 1.75) → {bmi: 22.857..., formatted: \"22.86\", classification: \"normal\"}",
    "bmi(\"120\", \"1.70\") → {formatted: \"41.52\", classification: \"obesity_iii\"}",
];

static BMI_RELATED: [&str; 1] = ["convert"];

impl FunctionPlugin for Bmi {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "bmi",
            description: "Body mass index with its classification band",
            usage: "bmi(weight_kg, height_m)",
            args: &BMI_ARGS,
            returns: "Object {bmi, formatted, classification, label}",
            examples: &BMI_EXAMPLES,
            category: "health",
            related: &BMI_RELATED,
        }
    }

    fn call(&self, args: &[Value]) -> Value {
        if args.len() != 2 {
            return Value::Error(ChronosError::arg_count("bmi", 2, args.len()));
        }

        let weight = match extract_raw_input(&args[0], "bmi", "weight") {
            Ok(s) => s,
            Err(e) => return Value::Error(e),
        };
        let height = match extract_raw_input(&args[1], "bmi", "height") {
            Ok(s) => s,
            Err(e) => return Value::Error(e),
        };

        match classify_bmi_raw(&weight, &height) {
            Ok(report) => Value::object([
                ("bmi", Value::Number(report.bmi)),
                ("formatted", Value::Text(report.formatted)),
                ("classification", Value::Text(report.classification.key().to_string())),
                ("label", Value::Text(report.classification.label().to_string())),
            ]),
            Err(e) => Value::Error(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chronos_core::codes;

    #[test]
    fn test_normal_weight() {
        let report = classify_bmi(70.0, 1.75).unwrap();
        assert_eq!(report.formatted, "22.86");
        assert_eq!(report.classification, Classification::Normal);
    }

    #[test]
    fn test_thresholds_lower_bound_inclusive() {
        assert_eq!(Classification::from_bmi(18.49), Classification::Underweight);
        assert_eq!(Classification::from_bmi(18.5), Classification::Normal);
        assert_eq!(Classification::from_bmi(25.0), Classification::Overweight);
        assert_eq!(Classification::from_bmi(30.0), Classification::ObesityI);
        assert_eq!(Classification::from_bmi(35.0), Classification::ObesityII);
        assert_eq!(Classification::from_bmi(39.99), Classification::ObesityII);
        assert_eq!(Classification::from_bmi(40.0), Classification::ObesityIII);
    }

    #[test]
    fn test_non_positive() {
        assert_eq!(classify_bmi(0.0, 1.8), Err(BmiError::NonPositive { field: "weight" }));
        assert_eq!(classify_bmi(70.0, -1.8), Err(BmiError::NonPositive { field: "height" }));
    }

    #[test]
    fn test_invalid_wins_over_non_positive() {
        let err = classify_bmi_raw("-5", "tall").unwrap_err();
        assert!(matches!(err, BmiError::InvalidNumber { field: "height", .. }));
    }

    #[test]
    fn test_raw_prefix_parsing() {
        let report = classify_bmi_raw("80kg", "1.80m").unwrap();
        assert_eq!(report.formatted, "24.69");
    }

    #[test]
    fn test_plugin_result() {
        let result = Bmi.call(&[Value::Number(70.0), Value::Number(1.75)]);
        assert_eq!(result.get("formatted"), Value::Text("22.86".into()));
        assert_eq!(result.get("classification"), Value::Text("normal".into()));
    }

    #[test]
    fn test_plugin_errors() {
        let err = Bmi.call(&[Value::Text("abc".into()), Value::Number(1.75)]);
        assert!(err.as_error().unwrap().is(codes::INVALID_NUMBER));
        let err = Bmi.call(&[Value::Number(0.0), Value::Number(1.75)]);
        assert!(err.as_error().unwrap().is(codes::NON_POSITIVE_VALUE));
    }
}

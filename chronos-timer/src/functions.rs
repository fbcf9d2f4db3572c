//! Timer display functions for the plugin registry

use chronos_core::{ChronosError, Value};
use chronos_plugin::helpers::{expect_args, extract_number};
use chronos_plugin::{ArgMeta, FunctionMeta, FunctionPlugin};

use crate::{format_countdown, format_stopwatch};

/// A non-negative whole count (milliseconds or seconds)
fn extract_count(value: &Value, func: &str, arg: &str) -> Result<u64, ChronosError> {
    let n = extract_number(value, func, arg)?;
    if !n.is_finite() || n < 0.0 {
        return Err(ChronosError::arg_type(func, arg, "non-negative Number", "negative or non-finite"));
    }
    Ok(n.floor() as u64)
}

// ============ format_stopwatch ============

pub struct FormatStopwatch;

static FORMAT_STOPWATCH_ARGS: [ArgMeta; 1] = [
    ArgMeta::required("ms", "Number", "Elapsed milliseconds"),
];

static FORMAT_STOPWATCH_EXAMPLES: [&str; 2] = [
    "format_stopwatch(1234) → \"00:00:01.23\"",
    "format_stopwatch(3723450) → \"01:02:03.45\"",
];

static FORMAT_STOPWATCH_RELATED: [&str; 1] = ["format_countdown"];

impl FunctionPlugin for FormatStopwatch {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "format_stopwatch",
            description: "Render elapsed milliseconds as HH:MM:SS.cc",
            usage: "format_stopwatch(ms)",
            args: &FORMAT_STOPWATCH_ARGS,
            returns: "Text",
            examples: &FORMAT_STOPWATCH_EXAMPLES,
            category: "timer",
            related: &FORMAT_STOPWATCH_RELATED,
        }
    }

    fn call(&self, args: &[Value]) -> Value {
        if let Err(e) = expect_args(args, "format_stopwatch", 1, 1) {
            return Value::Error(e);
        }
        match extract_count(&args[0], "format_stopwatch", "ms") {
            Ok(ms) => Value::Text(format_stopwatch(ms)),
            Err(e) => Value::Error(e),
        }
    }
}

// ============ format_countdown ============

pub struct FormatCountdown;

static FORMAT_COUNTDOWN_ARGS: [ArgMeta; 1] = [
    ArgMeta::required("seconds", "Number", "Remaining seconds"),
];

static FORMAT_COUNTDOWN_EXAMPLES: [&str; 2] = [
    "format_countdown(3600) → \"01:00:00\"",
    "format_countdown(90) → \"00:01:30\"",
];

static FORMAT_COUNTDOWN_RELATED: [&str; 1] = ["format_stopwatch"];

impl FunctionPlugin for FormatCountdown {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "format_countdown",
            description: "Render remaining seconds as HH:MM:SS",
            usage: "format_countdown(seconds)",
            args: &FORMAT_COUNTDOWN_ARGS,
            returns: "Text",
            examples: &FORMAT_COUNTDOWN_EXAMPLES,
            category: "timer",
            related: &FORMAT_COUNTDOWN_RELATED,
        }
    }

    fn call(&self, args: &[Value]) -> Value {
        if let Err(e) = expect_args(args, "format_countdown", 1, 1) {
            return Value::Error(e);
        }
        match extract_count(&args[0], "format_countdown", "seconds") {
            Ok(secs) => Value::Text(format_countdown(secs)),
            Err(e) => Value::Error(e),
        }
    }
}

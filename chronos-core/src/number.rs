//! Number parsing and rendering
//!
//! Inputs are parsed the way a browser form field hands them to
//! `parseFloat`, and results are rendered exactly like ECMAScript's
//! `Number.prototype.toFixed`, `toExponential` and `toString`. Rounding
//! works on the exact decimal expansion of the binary value, so ties round
//! away from zero rather than to even.

use thiserror::Error;

/// Error type for number parsing
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NumberError {
    #[error("Invalid number format: {0}")]
    ParseError(String),

    #[error("Not a finite number: {0}")]
    NotFinite(String),
}

/// Enough fractional digits to hold the exact expansion of any f64.
const EXACT_DIGITS: usize = 800;

/// `toFixed` falls back to plain `toString` from this magnitude on.
const FIXED_LIMIT: f64 = 1e21;

// ========== Parsing ==========

/// Parse the longest numeric prefix of `raw`, returning NaN when there is none.
///
/// Leading whitespace is skipped, trailing garbage ignored, and a signed
/// `Infinity` literal is accepted.
pub fn parse_float(raw: &str) -> f64 {
    let s = raw.trim_start();
    let bytes = s.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    if s[end..].starts_with("Infinity") {
        return if s.starts_with('-') { f64::NEG_INFINITY } else { f64::INFINITY };
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return f64::NAN;
    }

    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse::<f64>().unwrap_or(f64::NAN)
}

/// Parse raw input, rejecting anything that is not a finite number.
pub fn parse_finite(raw: &str) -> Result<f64, NumberError> {
    let value = parse_float(raw);
    if value.is_nan() {
        return Err(NumberError::ParseError(raw.to_string()));
    }
    if !value.is_finite() {
        return Err(NumberError::NotFinite(raw.to_string()));
    }
    Ok(value)
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

// ========== Rendering ==========

/// Render with exactly `digits` fractional digits (`toFixed`).
pub fn to_fixed(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.abs() >= FIXED_LIMIT {
        return to_js_string(value);
    }

    let (sign, x) = split_sign(value);
    let units = if x == 0.0 {
        "0".to_string()
    } else {
        let (sig, exp10) = exact_digits(x);
        scaled_integer(&sig, exp10, digits)
    };

    if digits == 0 {
        return format!("{}{}", sign, units);
    }

    let padded = format!("{:0>width$}", units, width = digits + 1);
    let (int_part, frac_part) = padded.split_at(padded.len() - digits);
    format!("{}{}.{}", sign, int_part, frac_part)
}

/// Render in scientific notation with `digits` fractional digits (`toExponential`).
pub fn to_exponential(value: f64, digits: usize) -> String {
    if let Some(special) = non_finite(value) {
        return special;
    }

    let (sign, x) = split_sign(value);
    let (sig, exp10) = if x == 0.0 {
        (vec![b'0'; digits + 1], 0)
    } else {
        let (sig, exp10) = exact_digits(x);
        round_half_up(&sig, exp10, digits + 1)
    };

    let mut out = String::from(sign);
    out.push(sig[0] as char);
    if digits > 0 {
        out.push('.');
        out.extend(sig[1..].iter().map(|&d| d as char));
    }
    out.push_str(&exponent_suffix(exp10));
    out
}

/// Shortest round-trip rendering (`Number.prototype.toString`).
pub fn to_js_string(value: f64) -> String {
    if let Some(special) = non_finite(value) {
        return special;
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let (sign, x) = split_sign(value);
    let (sig, exp10) = shortest_digits(x);
    let k = sig.len() as i32;
    let n = exp10 + 1;
    let digits: String = sig.iter().map(|&d| d as char).collect();

    let body = if k <= n && n <= 21 {
        format!("{}{}", digits, "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int_part, frac_part) = digits.split_at(n as usize);
        format!("{}.{}", int_part, frac_part)
    } else if -6 < n && n <= 0 {
        format!("0.{}{}", "0".repeat((-n) as usize), digits)
    } else {
        let mut mantissa = digits[..1].to_string();
        if k > 1 {
            mantissa.push('.');
            mantissa.push_str(&digits[1..]);
        }
        format!("{}{}", mantissa, exponent_suffix(n - 1))
    };

    format!("{}{}", sign, body)
}

fn non_finite(value: f64) -> Option<String> {
    if value.is_nan() {
        Some("NaN".to_string())
    } else if value == f64::INFINITY {
        Some("Infinity".to_string())
    } else if value == f64::NEG_INFINITY {
        Some("-Infinity".to_string())
    } else {
        None
    }
}

/// Negative zero renders without a sign.
fn split_sign(value: f64) -> (&'static str, f64) {
    if value < 0.0 {
        ("-", -value)
    } else {
        ("", value.abs())
    }
}

fn exponent_suffix(exp10: i32) -> String {
    if exp10 < 0 {
        format!("e-{}", -exp10)
    } else {
        format!("e+{}", exp10)
    }
}

/// Exact decimal significand of a positive finite value and the power of
/// ten of its first digit. Trailing zeros are stripped.
fn exact_digits(x: f64) -> (Vec<u8>, i32) {
    split_scientific(&format!("{:.prec$e}", x, prec = EXACT_DIGITS))
}

/// Shortest significand that round-trips to `x`.
fn shortest_digits(x: f64) -> (Vec<u8>, i32) {
    split_scientific(&format!("{:e}", x))
}

fn split_scientific(text: &str) -> (Vec<u8>, i32) {
    let (mantissa, exponent) = text.split_once('e').unwrap_or((text, "0"));
    let exp10 = exponent.parse::<i32>().unwrap_or(0);
    let mut sig: Vec<u8> = mantissa.bytes().filter(u8::is_ascii_digit).collect();
    while sig.len() > 1 && sig.last() == Some(&b'0') {
        sig.pop();
    }
    (sig, exp10)
}

/// Keep `keep` significant digits, rounding ties up. A carry out of the
/// leading digit bumps the exponent.
fn round_half_up(sig: &[u8], exp10: i32, keep: usize) -> (Vec<u8>, i32) {
    if sig.len() <= keep {
        let mut out = sig.to_vec();
        out.resize(keep, b'0');
        return (out, exp10);
    }

    let mut out = sig[..keep].to_vec();
    if sig[keep] < b'5' {
        return (out, exp10);
    }

    for digit in out.iter_mut().rev() {
        if *digit == b'9' {
            *digit = b'0';
        } else {
            *digit += 1;
            return (out, exp10);
        }
    }

    // every digit carried: 99.9 -> 100
    out.insert(0, b'1');
    out.truncate(keep);
    (out, exp10 + 1)
}

/// Integer digits of `round(x * 10^digits)`.
fn scaled_integer(sig: &[u8], exp10: i32, digits: usize) -> String {
    let keep = exp10 + 1 + digits as i32;
    if keep < 0 {
        return "0".to_string();
    }
    if keep == 0 {
        return if sig[0] >= b'5' { "1" } else { "0" }.to_string();
    }

    let (rounded, new_exp) = round_half_up(sig, exp10, keep as usize);
    let mut units: String = rounded.iter().map(|&d| d as char).collect();
    if new_exp > exp10 {
        units.push('0');
    }
    units
}

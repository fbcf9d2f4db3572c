//! Calculator state machine

use crate::{Key, Operator};
use chronos_core::{parse_float, to_js_string};
use serde::Serialize;

/// Display text after an invalid operation (square root of a negative)
pub const ERROR_TOKEN: &str = "Error";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Calculator {
    display: String,
    pending: Option<Operator>,
    accumulator: Option<f64>,
    reset_on_next_digit: bool,
    separator: char,
}

impl Calculator {
    pub fn new() -> Self {
        Self {
            display: "0".to_string(),
            pending: None,
            accumulator: None,
            reset_on_next_digit: false,
            separator: '.',
        }
    }

    /// Render and enter decimals with `separator` (`','` for pt-BR keypads)
    pub fn with_decimal_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn pending_operator(&self) -> Option<Operator> {
        self.pending
    }

    pub fn accumulator(&self) -> Option<f64> {
        self.accumulator
    }

    pub fn decimal_separator(&self) -> char {
        self.separator
    }

    /// Secondary line shown while an operator waits, e.g. `"12 +"`.
    /// A missing accumulator renders as 0.
    pub fn pending_expression(&self) -> Option<String> {
        let op = self.pending?;
        let acc = self.accumulator.filter(|a| !a.is_nan()).unwrap_or(0.0);
        Some(format!("{} {}", self.format_number(acc), op))
    }

    pub fn press(&mut self, key: Key) {
        match key {
            Key::Digit(d) => self.digit(d),
            Key::Decimal => self.decimal(),
            Key::Operator(op) => self.operator(op),
            Key::Equals => self.equals(),
            Key::SquareRoot => self.square_root(),
            Key::Percent => self.percent(),
            Key::Clear => self.clear(),
            Key::Delete => self.delete(),
        }
    }

    /// Press every key in order, returning the final display
    pub fn press_all<I: IntoIterator<Item = Key>>(&mut self, keys: I) -> &str {
        for key in keys {
            self.press(key);
        }
        &self.display
    }

    /// Enter a digit. Values above 9 are not keypad digits and are ignored.
    pub fn digit(&mut self, digit: u8) {
        let Some(digit) = char::from_digit(u32::from(digit), 10) else {
            tracing::debug!(digit, "ignoring out-of-range digit");
            return;
        };
        if self.display == "0" || self.reset_on_next_digit {
            self.display = digit.to_string();
            self.reset_on_next_digit = false;
        } else {
            self.display.push(digit);
        }
    }

    pub fn decimal(&mut self) {
        if self.reset_on_next_digit {
            self.display = format!("0{}", self.separator);
            self.reset_on_next_digit = false;
            return;
        }
        if !self.display.contains(self.separator) {
            self.display.push(self.separator);
        }
    }

    /// Chain: a pending operation is applied before the new one is armed.
    /// Pressing two operators in a row applies the first to the displayed
    /// result again.
    pub fn operator(&mut self, op: Operator) {
        let current = self.current_value();
        match self.accumulator {
            Some(acc) => {
                let result = match self.pending {
                    Some(pending) => pending.apply(acc, current),
                    None => current,
                };
                self.display = self.format_number(result);
                self.accumulator = Some(result);
            }
            None => self.accumulator = Some(current),
        }
        self.pending = Some(op);
        self.reset_on_next_digit = true;
    }

    pub fn equals(&mut self) {
        let (Some(acc), Some(op)) = (self.accumulator, self.pending) else {
            return;
        };
        let result = op.apply(acc, self.current_value());
        tracing::debug!(acc, op = %op, result, "equals");
        self.display = self.format_number(result);
        self.accumulator = None;
        self.pending = None;
        self.reset_on_next_digit = true;
    }

    pub fn square_root(&mut self) {
        let current = self.current_value();
        self.display = if current < 0.0 {
            ERROR_TOKEN.to_string()
        } else {
            self.format_number(current.sqrt())
        };
        self.reset_on_next_digit = true;
    }

    /// Percent of the accumulator when one is set, else of 100.
    pub fn percent(&mut self) {
        let current = self.current_value();
        let value = match self.accumulator {
            Some(acc) => acc * current / 100.0,
            None => current / 100.0,
        };
        self.display = self.format_number(value);
    }

    pub fn clear(&mut self) {
        let separator = self.separator;
        *self = Self::new().with_decimal_separator(separator);
    }

    pub fn delete(&mut self) {
        let chars = self.display.chars().count();
        if chars == 1 || (chars == 2 && self.display.contains('-')) {
            self.display = "0".to_string();
        } else {
            self.display.pop();
        }
    }

    /// Displayed value; either separator is accepted, an error token reads as NaN
    pub fn current_value(&self) -> f64 {
        parse_float(&self.display.replacen(',', ".", 1))
    }

    fn format_number(&self, value: f64) -> String {
        let text = to_js_string(value);
        if self.separator == '.' {
            text
        } else {
            text.replacen('.', &self.separator.to_string(), 1)
        }
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

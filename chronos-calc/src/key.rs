//! Keys and operators

use chronos_core::ChronosError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// Division by zero yields 0, matching the keypad's long-standing behavior.
    pub fn apply(&self, a: f64, b: f64) -> f64 {
        match self {
            Operator::Add => a + b,
            Operator::Subtract => a - b,
            Operator::Multiply => a * b,
            Operator::Divide => {
                if b != 0.0 {
                    a / b
                } else {
                    0.0
                }
            }
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '×',
            Operator::Divide => '÷',
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A single key press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Key {
    Digit(u8),
    Decimal,
    Operator(Operator),
    Equals,
    SquareRoot,
    Percent,
    Clear,
    Delete,
}

impl Key {
    /// Map a keyboard key name (`"7"`, `"*"`, `"Enter"`, `"Backspace"`, ...)
    pub fn from_keyboard(name: &str) -> Option<Key> {
        match name {
            "Enter" | "=" => return Some(Key::Equals),
            "Escape" | "Delete" => return Some(Key::Clear),
            "Backspace" => return Some(Key::Delete),
            _ => {}
        }

        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Key::from_char(c),
            _ => None,
        }
    }

    /// Map a single keypad symbol
    pub fn from_char(c: char) -> Option<Key> {
        let key = match c {
            '0'..='9' => Key::Digit(c as u8 - b'0'),
            '.' | ',' => Key::Decimal,
            '+' => Key::Operator(Operator::Add),
            '-' => Key::Operator(Operator::Subtract),
            '*' | '×' | 'x' => Key::Operator(Operator::Multiply),
            '/' | '÷' => Key::Operator(Operator::Divide),
            '=' => Key::Equals,
            '%' => Key::Percent,
            'r' | 'R' | '√' => Key::SquareRoot,
            'c' | 'C' => Key::Clear,
            '⌫' => Key::Delete,
            _ => return None,
        };
        Some(key)
    }

    /// Parse a key sequence such as `"5+3="` or `"9 sqrt"`.
    ///
    /// Whitespace separates named keys (`Enter`, `Backspace`, `sqrt`, ...);
    /// anything else is read one symbol at a time.
    pub fn parse_sequence(text: &str) -> Result<Vec<Key>, ChronosError> {
        let mut keys = Vec::new();
        for token in text.split_whitespace() {
            if let Some(key) = Self::named(token) {
                keys.push(key);
                continue;
            }
            for c in token.chars() {
                let key = Self::from_char(c).ok_or_else(|| ChronosError::invalid_key(&c.to_string()))?;
                keys.push(key);
            }
        }
        Ok(keys)
    }

    fn named(token: &str) -> Option<Key> {
        match token.to_ascii_lowercase().as_str() {
            "enter" => Some(Key::Equals),
            "escape" | "esc" | "clear" | "delete" | "del" => Some(Key::Clear),
            "backspace" | "back" => Some(Key::Delete),
            "sqrt" => Some(Key::SquareRoot),
            _ => None,
        }
    }
}

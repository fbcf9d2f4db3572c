//! Server configuration from the environment

use chronos_currency::ExchangeConfig;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub exchange: ExchangeConfig,
    /// Calculator display separator, `.` or `,`
    pub decimal_separator: char,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            exchange: ExchangeConfig::default(),
            decimal_separator: '.',
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            exchange: ExchangeConfig::from_env(),
            decimal_separator: parse_separator(std::env::var("CHRONOS_DECIMAL_SEPARATOR").ok()),
        }
    }
}

fn parse_separator(raw: Option<String>) -> char {
    match raw.as_deref().map(str::trim) {
        None | Some(".") => '.',
        Some(",") => ',',
        Some(other) => {
            tracing::warn!(value = other, "CHRONOS_DECIMAL_SEPARATOR must be '.' or ','; using '.'");
            '.'
        }
    }
}

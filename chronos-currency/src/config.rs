//! Exchange-rate service configuration, read from the environment

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://v6.exchangerate-api.com/v6";

#[derive(Debug, Clone)]
pub struct ExchangeConfig {
    /// Service root; requests go to `{base_url}/{api_key}/latest/{FROM}`
    pub base_url: String,
    pub api_key: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Extra attempts after a transport failure or HTTP 5xx
    pub retries: u32,
    pub retry_backoff: Duration,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(5),
            retries: 2,
            retry_backoff: Duration::from_millis(250),
        }
    }
}

impl ExchangeConfig {
    /// Defaults overridden by `CHRONOS_EXCHANGE_*` variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(url) = lookup("CHRONOS_EXCHANGE_BASE_URL") {
            config.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(key) = lookup("CHRONOS_EXCHANGE_API_KEY") {
            config.api_key = key;
        }
        if let Some(secs) = parse_var(&lookup, "CHRONOS_EXCHANGE_TIMEOUT_SECS") {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(retries) = parse_var(&lookup, "CHRONOS_EXCHANGE_RETRIES") {
            config.retries = retries;
        }
        config
    }
}

fn parse_var<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring malformed setting");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> ExchangeConfig {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        ExchangeConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let c = config(&[]);
        assert_eq!(c.base_url, DEFAULT_BASE_URL);
        assert_eq!(c.timeout, Duration::from_secs(10));
        assert_eq!(c.retries, 2);
        assert!(c.api_key.is_empty());
    }

    #[test]
    fn test_overrides() {
        let c = config(&[
            ("CHRONOS_EXCHANGE_BASE_URL", "http://localhost:9000/v6/"),
            ("CHRONOS_EXCHANGE_API_KEY", "abc"),
            ("CHRONOS_EXCHANGE_TIMEOUT_SECS", "3"),
            ("CHRONOS_EXCHANGE_RETRIES", "0"),
        ]);
        assert_eq!(c.base_url, "http://localhost:9000/v6");
        assert_eq!(c.api_key, "abc");
        assert_eq!(c.timeout, Duration::from_secs(3));
        assert_eq!(c.retries, 0);
    }

    #[test]
    fn test_malformed_falls_back() {
        let c = config(&[("CHRONOS_EXCHANGE_TIMEOUT_SECS", "soon")]);
        assert_eq!(c.timeout, Duration::from_secs(10));
    }
}

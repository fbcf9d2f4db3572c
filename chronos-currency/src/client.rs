//! Exchange-rate lookup

use crate::config::ExchangeConfig;
use crate::currency::Currency;
use async_trait::async_trait;
use chronos_core::ChronosError;
use reqwest::{Client, ClientBuilder};
use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;

/// Rates from one base currency, keyed by target code
pub type RateTable = HashMap<String, f64>;

#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("service answered '{0}'")]
    Unsuccessful(String),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("no rate from {from} to {to}")]
    MissingRate { from: Currency, to: Currency },
}

impl ExchangeError {
    /// Transport failures and server errors are worth another attempt
    pub fn is_retryable(&self) -> bool {
        match self {
            ExchangeError::Transport(_) => true,
            ExchangeError::Status(code) => *code >= 500,
            _ => false,
        }
    }
}

impl From<ExchangeError> for ChronosError {
    fn from(err: ExchangeError) -> Self {
        ChronosError::exchange_rate_unavailable().with_detail(err.to_string())
    }
}

/// Source of exchange rates
#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn rates(&self, from: Currency) -> Result<RateTable, ExchangeError>;
}

#[derive(Debug, Deserialize)]
struct LatestResponse {
    result: String,
    #[serde(default)]
    conversion_rates: RateTable,
}

/// Client for the ExchangeRate-API `latest` endpoint
pub struct ExchangeRateClient {
    config: ExchangeConfig,
    http: Client,
}

impl ExchangeRateClient {
    pub fn new(config: ExchangeConfig) -> Result<Self, ExchangeError> {
        let http = ClientBuilder::new()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &ExchangeConfig {
        &self.config
    }

    fn latest_url(&self, from: Currency) -> String {
        format!("{}/{}/latest/{}", self.config.base_url, self.config.api_key, from.code())
    }

    async fn fetch_once(&self, from: Currency) -> Result<RateTable, ExchangeError> {
        let response = self.http.get(self.latest_url(from)).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExchangeError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let latest: LatestResponse =
            serde_json::from_str(&body).map_err(|e| ExchangeError::Malformed(e.to_string()))?;

        if latest.result != "success" {
            return Err(ExchangeError::Unsuccessful(latest.result));
        }
        Ok(latest.conversion_rates)
    }
}

#[async_trait]
impl RateProvider for ExchangeRateClient {
    async fn rates(&self, from: Currency) -> Result<RateTable, ExchangeError> {
        let mut attempt = 0;
        loop {
            match self.fetch_once(from).await {
                Ok(rates) => return Ok(rates),
                Err(e) if e.is_retryable() && attempt < self.config.retries => {
                    attempt += 1;
                    tracing::warn!(error = %e, attempt, "exchange-rate request failed, retrying");
                    tokio::time::sleep(self.config.retry_backoff).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Fixed rates, for offline use and tests
#[derive(Debug, Clone, Default)]
pub struct StaticRates {
    tables: HashMap<Currency, RateTable>,
}

impl StaticRates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rate(mut self, from: Currency, to: Currency, rate: f64) -> Self {
        self.tables
            .entry(from)
            .or_default()
            .insert(to.code().to_string(), rate);
        self
    }
}

#[async_trait]
impl RateProvider for StaticRates {
    async fn rates(&self, from: Currency) -> Result<RateTable, ExchangeError> {
        self.tables
            .get(&from)
            .cloned()
            .ok_or_else(|| ExchangeError::Unsuccessful(format!("no table for {}", from)))
    }
}

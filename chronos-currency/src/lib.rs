//! Chronos Currency
//!
//! Converts amounts between USD, BRL and EUR using live rates from an
//! ExchangeRate-API compatible service. Rate lookup sits behind the
//! [`RateProvider`] trait so conversion can run against [`StaticRates`].

mod client;
mod config;
mod convert;
mod currency;

pub use client::{ExchangeError, ExchangeRateClient, RateProvider, RateTable, StaticRates};
pub use config::{ExchangeConfig, DEFAULT_BASE_URL};
pub use convert::{convert_currency, CurrencyConversion, CURRENCY_FORMAT};
pub use currency::Currency;

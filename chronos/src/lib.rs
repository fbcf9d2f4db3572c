//! Chronos - everyday conversions, a calculator and timers
//!
//! Bundles every tool crate behind one registry and keeps the single
//! asynchronous tool, currency conversion, next to it.

use chronos_core::{ChronosError, Value};
use chronos_currency::{convert_currency, Currency, CurrencyConversion, RateProvider};
use chronos_plugin::PluginRegistry;
use std::sync::Arc;

pub use chronos_calc as calc;
pub use chronos_core as core;
pub use chronos_currency as currency;
pub use chronos_health as health;
pub use chronos_plugin as plugin;
pub use chronos_timer as timer;
pub use chronos_units as units;

/// Load every synchronous tool into registry
pub fn load_standard_library(registry: PluginRegistry) -> PluginRegistry {
    let registry = chronos_units::load_units_library(registry);
    let registry = chronos_health::load_health_library(registry);
    let registry = chronos_calc::load_calc_library(registry);
    chronos_timer::load_timer_library(registry)
}

/// Create registry with every tool
pub fn standard_registry() -> PluginRegistry {
    load_standard_library(PluginRegistry::new())
}

/// Main Chronos engine
pub struct Chronos {
    registry: Arc<PluginRegistry>,
    rates: Arc<dyn RateProvider>,
}

impl Chronos {
    pub fn new(registry: PluginRegistry, rates: Arc<dyn RateProvider>) -> Self {
        Self {
            registry: Arc::new(registry),
            rates,
        }
    }

    pub fn with_standard_library(rates: Arc<dyn RateProvider>) -> Self {
        Self::new(standard_registry(), rates)
    }

    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }

    pub fn call(&self, name: &str, args: &[Value]) -> Value {
        self.registry.call_function(name, args)
    }

    pub fn help(&self, name: Option<&str>) -> Value {
        self.registry.help(name)
    }

    pub fn list_functions(&self, category: Option<&str>) -> Value {
        self.registry.list_functions(category)
    }

    /// Convert an amount typed as text between two currency codes
    pub async fn convert_currency(&self, raw: &str, from: &str, to: &str) -> Value {
        let (from, to) = match parse_currencies(from, to) {
            Ok(pair) => pair,
            Err(e) => return Value::Error(e),
        };
        match convert_currency(self.rates.as_ref(), raw, from, to).await {
            Ok(conversion) => conversion_to_value(&conversion),
            Err(e) => Value::Error(e),
        }
    }
}

fn parse_currencies(from: &str, to: &str) -> Result<(Currency, Currency), ChronosError> {
    Ok((from.parse()?, to.parse()?))
}

fn conversion_to_value(c: &CurrencyConversion) -> Value {
    Value::object([
        ("amount", Value::Number(c.amount)),
        ("from", Value::Text(c.from.code().to_string())),
        ("to", Value::Text(c.to.code().to_string())),
        ("rate", Value::Number(c.rate)),
        ("value", Value::Number(c.value)),
        ("formatted", Value::Text(c.formatted.clone())),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chronos_core::codes;
    use chronos_currency::StaticRates;

    fn chronos() -> Chronos {
        let rates = StaticRates::new().with_rate(Currency::Usd, Currency::Brl, 5.25);
        Chronos::with_standard_library(Arc::new(rates))
    }

    #[test]
    fn test_standard_registry_has_every_tool() {
        let registry = standard_registry();
        for name in [
            "convert", "to_base", "list_units", "list_dimensions",
            "bmi", "calculate", "format_stopwatch", "format_countdown",
        ] {
            assert!(registry.get_function(name).is_some(), "missing {}", name);
        }
    }

    #[test]
    fn test_call_routes_to_plugins() {
        let c = chronos();
        let result = c.call("calculate", &[Value::Text("5+3=".into())]);
        assert_eq!(result.get("display"), Value::Text("8".into()));

        let bmi = c.call("bmi", &[Value::Number(70.0), Value::Number(1.75)]);
        assert_eq!(bmi.get("formatted"), Value::Text("22.86".into()));
    }

    #[test]
    fn test_unknown_function() {
        let result = chronos().call("convrt", &[]);
        assert!(result.as_error().unwrap().is(codes::UNDEFINED_FUNC));
    }

    #[tokio::test]
    async fn test_currency() {
        let c = chronos();
        let result = c.convert_currency("2", "usd", "BRL").await;
        assert_eq!(result.get("formatted"), Value::Text("10.50".into()));

        let err = c.convert_currency("2", "USD", "GBP").await;
        assert!(err.as_error().unwrap().is(codes::UNKNOWN_CURRENCY));
    }
}

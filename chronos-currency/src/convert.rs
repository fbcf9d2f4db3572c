use crate::client::{ExchangeError, RateProvider};
use crate::currency::Currency;
use chronos_core::{parse_finite, ChronosError, FormatPolicy};
use serde::Serialize;

/// Display policy for converted amounts
pub const CURRENCY_FORMAT: FormatPolicy = FormatPolicy::fixed(2);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrencyConversion {
    pub amount: f64,
    pub from: Currency,
    pub to: Currency,
    pub rate: f64,
    pub value: f64,
    pub formatted: String,
}

/// Convert a raw amount between currencies at the provider's current rate.
///
/// The amount is validated before any request is made.
pub async fn convert_currency<P>(
    provider: &P,
    raw: &str,
    from: Currency,
    to: Currency,
) -> Result<CurrencyConversion, ChronosError>
where
    P: RateProvider + ?Sized,
{
    let amount = parse_finite(raw)?;
    if amount <= 0.0 {
        return Err(ChronosError::non_positive("Amount"));
    }

    let rates = provider.rates(from).await.map_err(|e| {
        tracing::warn!(error = %e, %from, %to, "exchange rates unavailable");
        ChronosError::from(e)
    })?;

    let rate = match rates.get(to.code()) {
        Some(&r) if r.is_finite() && r != 0.0 => r,
        _ => {
            let err = ExchangeError::MissingRate { from, to };
            tracing::warn!(error = %err, "exchange rate missing");
            return Err(err.into());
        }
    };

    let value = amount * rate;
    tracing::debug!(amount, %from, %to, rate, value, "currency converted");
    Ok(CurrencyConversion {
        amount,
        from,
        to,
        rate,
        value,
        formatted: CURRENCY_FORMAT.format(value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StaticRates;
    use chronos_core::codes;

    fn rates() -> StaticRates {
        StaticRates::new()
            .with_rate(Currency::Usd, Currency::Brl, 5.0)
            .with_rate(Currency::Usd, Currency::Eur, 0.0)
            .with_rate(Currency::Brl, Currency::Usd, 0.2)
    }

    #[tokio::test]
    async fn test_converts_with_two_decimals() {
        let result = convert_currency(&rates(), "10", Currency::Usd, Currency::Brl).await.unwrap();
        assert_eq!(result.value, 50.0);
        assert_eq!(result.formatted, "50.00");

        let back = convert_currency(&rates(), "12.5", Currency::Brl, Currency::Usd).await.unwrap();
        assert_eq!(back.formatted, "2.50");
    }

    #[tokio::test]
    async fn test_rejects_bad_amounts() {
        let err = convert_currency(&rates(), "abc", Currency::Usd, Currency::Brl).await.unwrap_err();
        assert!(err.is(codes::INVALID_NUMBER));

        for raw in ["0", "-5"] {
            let err = convert_currency(&rates(), raw, Currency::Usd, Currency::Brl).await.unwrap_err();
            assert!(err.is(codes::NON_POSITIVE_VALUE));
        }
    }

    #[tokio::test]
    async fn test_missing_or_zero_rate_is_unavailable() {
        let zero = convert_currency(&rates(), "1", Currency::Usd, Currency::Eur).await.unwrap_err();
        assert!(zero.is(codes::EXCHANGE_RATE_UNAVAILABLE));

        let no_table = convert_currency(&rates(), "1", Currency::Eur, Currency::Usd).await.unwrap_err();
        assert!(no_table.is(codes::EXCHANGE_RATE_UNAVAILABLE));
        assert!(no_table.detail.is_some());
    }
}

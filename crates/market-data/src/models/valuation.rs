use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::types::Currency;

/// Current worth of one subscription as reported by a provider
#[derive(Clone, Debug, PartialEq)]
pub struct Valuation {
    /// Current value of the whole subscription (not per unit)
    pub value: Decimal,

    /// Acquisition value as reported by the provider, if any
    pub acquisition_value: Option<Decimal>,

    /// Date the provider was asked to price at
    pub query_date: NaiveDate,

    /// Value currency
    pub currency: Currency,

    /// Source of the value (IGCP, ...)
    pub source: String,
}

impl Valuation {
    /// Create a valuation with the minimal required fields
    pub fn new(value: Decimal, query_date: NaiveDate, currency: Currency, source: String) -> Self {
        Self {
            value,
            acquisition_value: None,
            query_date,
            currency,
            source,
        }
    }

    pub fn with_acquisition_value(mut self, acquisition_value: Option<Decimal>) -> Self {
        self.acquisition_value = acquisition_value;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EUR;
    use rust_decimal_macros::dec;

    #[test]
    fn test_valuation_new() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let valuation = Valuation::new(dec!(32563.80), date, EUR, "IGCP".to_string());
        assert_eq!(valuation.value, dec!(32563.80));
        assert_eq!(valuation.currency, "EUR");
        assert!(valuation.acquisition_value.is_none());

        let valuation = valuation.with_acquisition_value(Some(dec!(30000)));
        assert_eq!(valuation.acquisition_value, Some(dec!(30000)));
    }
}

//! Subscription domain model.

use aforro_market_data::{Series, ValuationRequest};
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::constants::BASE_UNIT_VALUE;
use crate::errors::ValidationError;

/// One purchase lot of Certificados de Aforro.
///
/// Fields are private: a record can only be built through [`SubscriptionRecord::new`],
/// which enforces a non-empty subscription number and a positive unit count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionRecord {
    series: Series,
    subscription_number: String,
    acquisition_date: NaiveDate,
    units: u32,
}

impl SubscriptionRecord {
    pub fn new(
        series: Series,
        subscription_number: impl Into<String>,
        acquisition_date: NaiveDate,
        units: u32,
    ) -> Result<Self, ValidationError> {
        let subscription_number = subscription_number.into().trim().to_string();
        if subscription_number.is_empty() {
            return Err(ValidationError::InvalidSubscription {
                series: series.to_string(),
                subscription_number,
                message: "subscription number must not be empty".to_string(),
            });
        }
        if units == 0 {
            return Err(ValidationError::InvalidSubscription {
                series: series.to_string(),
                subscription_number,
                message: "units must be positive".to_string(),
            });
        }
        Ok(Self {
            series,
            subscription_number,
            acquisition_date,
            units,
        })
    }

    pub fn series(&self) -> Series {
        self.series
    }

    pub fn subscription_number(&self) -> &str {
        &self.subscription_number
    }

    pub fn acquisition_date(&self) -> NaiveDate {
        self.acquisition_date
    }

    pub fn units(&self) -> u32 {
        self.units
    }

    /// Amount paid for the subscription: every unit is acquired at 1.00 EUR.
    pub fn invested_value(&self) -> Decimal {
        Decimal::from(self.units) * BASE_UNIT_VALUE
    }

    /// `<series>-<number>`, used in progress lines and error messages.
    pub fn label(&self) -> String {
        format!("{}-{}", self.series, self.subscription_number)
    }

    /// Builds the provider request for valuing this subscription as of `as_of`.
    pub fn valuation_request(&self, as_of: NaiveDate) -> ValuationRequest {
        ValuationRequest {
            series: self.series,
            subscription_number: self.subscription_number.clone(),
            acquisition_date: self.acquisition_date,
            units: self.units,
            as_of,
        }
    }
}

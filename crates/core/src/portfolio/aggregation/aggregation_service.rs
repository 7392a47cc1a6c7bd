//! Aggregation service implementation.

use std::sync::Arc;

use aforro_market_data::ValuationProvider;
use chrono::NaiveDate;
use log::{debug, warn};
use rust_decimal::Decimal;

use super::aggregation_model::{
    AggregateReport, Aggregation, AggregationProgress, ValuationResult,
};
use crate::errors::Result;
use crate::subscriptions::SubscriptionRecord;

/// Values subscriptions one at a time and totals the results.
pub struct AggregationService {
    provider: Arc<dyn ValuationProvider>,
}

impl AggregationService {
    pub fn new(provider: Arc<dyn ValuationProvider>) -> Self {
        Self { provider }
    }

    /// Fetches each record's value in input order and aggregates the totals.
    ///
    /// Every record adds `units * 1.00` to the invested total; only successful
    /// fetches add to the current total. A failed fetch is recorded and the
    /// loop continues. `on_progress` is called after each fetch.
    ///
    /// Returns [`crate::Error::EmptyPortfolio`] when there is nothing to
    /// value, since the ratio would be undefined.
    pub async fn aggregate<F>(
        &self,
        records: &[SubscriptionRecord],
        as_of: NaiveDate,
        mut on_progress: F,
    ) -> Result<Aggregation>
    where
        F: FnMut(AggregationProgress<'_>),
    {
        let total = records.len();
        let mut total_invested = Decimal::ZERO;
        let mut total_current = Decimal::ZERO;
        let mut results = Vec::with_capacity(total);

        for (i, record) in records.iter().enumerate() {
            let result = match total_invested.checked_add(record.invested_value()) {
                Some(invested) => {
                    total_invested = invested;
                    self.value_record(record, as_of, &mut total_current).await
                }
                None => {
                    warn!("Invested total overflowed at {}", record.label());
                    ValuationResult::failed(record.clone(), "invested total out of range")
                }
            };

            on_progress(AggregationProgress {
                index: i + 1,
                total,
                result: &result,
            });
            results.push(result);
        }

        let report = AggregateReport::from_totals(total_current, total_invested)?;
        Ok(Aggregation { report, results })
    }

    /// Fetches one record and adds its value to `total_current`.
    ///
    /// A value that would overflow the running total is recorded as a failure
    /// for that record and leaves the total unchanged.
    async fn value_record(
        &self,
        record: &SubscriptionRecord,
        as_of: NaiveDate,
        total_current: &mut Decimal,
    ) -> ValuationResult {
        let request = record.valuation_request(as_of);
        let valuation = match self.provider.fetch_valuation(&request).await {
            Ok(valuation) => valuation,
            Err(e) => {
                warn!("Failed to value {}: {}", record.label(), e);
                return ValuationResult::failed(record.clone(), e.to_string());
            }
        };
        debug!(
            "{} valued at {} {} for {} by {}",
            record.label(),
            valuation.value,
            valuation.currency,
            valuation.query_date,
            valuation.source
        );

        match total_current.checked_add(valuation.value) {
            Some(current) => {
                *total_current = current;
                ValuationResult::succeeded(record.clone(), valuation.value)
            }
            None => {
                warn!(
                    "Value {} of {} overflows the current total",
                    valuation.value,
                    record.label()
                );
                ValuationResult::failed(
                    record.clone(),
                    format!("value {} out of range for the current total", valuation.value),
                )
            }
        }
    }
}

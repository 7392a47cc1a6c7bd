//! Aggregation domain models.

use rust_decimal::Decimal;

use crate::errors::{Error, Result};
use crate::subscriptions::SubscriptionRecord;

/// Outcome of a single fetch attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValuationStatus {
    /// The provider returned the current value of the subscription, in EUR.
    Succeeded(Decimal),
    /// The fetch failed; the reason is human readable and never empty.
    Failed(String),
}

/// One subscription paired with the outcome of valuing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValuationResult {
    pub subscription: SubscriptionRecord,
    pub status: ValuationStatus,
}

impl ValuationResult {
    pub fn succeeded(subscription: SubscriptionRecord, current_value: Decimal) -> Self {
        Self {
            subscription,
            status: ValuationStatus::Succeeded(current_value),
        }
    }

    pub fn failed(subscription: SubscriptionRecord, reason: impl Into<String>) -> Self {
        let mut reason = reason.into();
        if reason.trim().is_empty() {
            reason = "unknown error".to_string();
        }
        Self {
            subscription,
            status: ValuationStatus::Failed(reason),
        }
    }

    /// Current value, absent when the fetch failed.
    pub fn current_value(&self) -> Option<Decimal> {
        match &self.status {
            ValuationStatus::Succeeded(value) => Some(*value),
            ValuationStatus::Failed(_) => None,
        }
    }

    pub fn failure_reason(&self) -> Option<&str> {
        match &self.status {
            ValuationStatus::Succeeded(_) => None,
            ValuationStatus::Failed(reason) => Some(reason),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status, ValuationStatus::Succeeded(_))
    }
}

/// Invested and current totals with their ratio.
///
/// Only constructible when the invested total is non-zero, so holding one
/// guarantees a defined ratio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateReport {
    total_current_value: Decimal,
    total_invested_value: Decimal,
    ratio: Decimal,
}

impl AggregateReport {
    /// Builds a report from totals, failing with [`Error::EmptyPortfolio`]
    /// when nothing was invested.
    pub fn from_totals(total_current_value: Decimal, total_invested_value: Decimal) -> Result<Self> {
        if total_invested_value.is_zero() {
            return Err(Error::EmptyPortfolio);
        }
        let ratio = total_current_value
            .checked_div(total_invested_value)
            .ok_or(Error::EmptyPortfolio)?;
        Ok(Self {
            total_current_value,
            total_invested_value,
            ratio,
        })
    }

    pub fn total_current_value(&self) -> Decimal {
        self.total_current_value
    }

    pub fn total_invested_value(&self) -> Decimal {
        self.total_invested_value
    }

    /// `total_current_value / total_invested_value`, unrounded.
    pub fn ratio(&self) -> Decimal {
        self.ratio
    }
}

/// Everything produced by one aggregation run.
#[derive(Debug, Clone)]
pub struct Aggregation {
    pub report: AggregateReport,
    /// Per-subscription outcomes, in input order.
    pub results: Vec<ValuationResult>,
}

impl Aggregation {
    pub fn failed(&self) -> impl Iterator<Item = &ValuationResult> {
        self.results.iter().filter(|r| !r.is_success())
    }

    pub fn failed_count(&self) -> usize {
        self.failed().count()
    }

    pub fn all_failed(&self) -> bool {
        !self.results.is_empty() && self.results.iter().all(|r| !r.is_success())
    }
}

/// Progress notification emitted once per subscription, after its fetch.
#[derive(Debug, Clone, Copy)]
pub struct AggregationProgress<'a> {
    /// 1-based position in the input.
    pub index: usize,
    pub total: usize,
    pub result: &'a ValuationResult,
}

//! Core error types for the Aforro report.
//!
//! Per-subscription fetch failures are not errors at this level: they are
//! recorded as failed outcomes and aggregation continues. The variants here
//! are the structural failures that end a run.

use std::path::PathBuf;

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the report pipeline.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Subscriptions file '{}' not found. Create it from subscriptions.example.json", .0.display())]
    SubscriptionsNotFound(PathBuf),

    #[error("Failed to read subscriptions file '{}': {source}", .path.display())]
    SubscriptionsIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invested value is zero, so the ratio is undefined.
    #[error("No subscriptions to value: invested total is zero and the ratio is undefined")]
    EmptyPortfolio,

    #[error("All {0} valuation fetches failed; refusing to publish a ratio of zero")]
    AllFetchesFailed(usize),

    #[error("Failed to write report to '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while turning raw input into validated records.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid subscriptions JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Subscription #{index}: {message}")]
    InvalidRecord { index: usize, message: String },

    #[error("Subscription {series}-{subscription_number}: {message}")]
    InvalidSubscription {
        series: String,
        subscription_number: String,
        message: String,
    },
}

//! Portfolio-level computations over valued subscriptions.

pub mod aggregation;

pub use aggregation::*;

//! Aggregation module.
//!
//! Values every subscription through a provider and folds the outcomes into
//! invested and current totals and their ratio.

mod aggregation_model;
mod aggregation_service;

pub use aggregation_model::*;
pub use aggregation_service::*;

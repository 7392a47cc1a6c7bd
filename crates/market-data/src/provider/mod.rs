//! Valuation provider abstractions and implementations.
//!
//! This module contains:
//! - The `ValuationProvider` trait that all providers implement
//! - The IGCP simulator provider used in production
//!
//! Providers receive a fully-populated `ValuationRequest` and answer with a
//! single `Valuation` or a `FetchError`. They never retry.

mod traits;

pub mod igcp;

// Re-exports
pub use traits::ValuationProvider;

//! Aforro Market Data Crate
//!
//! This crate fetches the current worth of Certificados de Aforro
//! subscriptions from a remote pricing source.
//!
//! # Overview
//!
//! ```text
//! +------------------+     +------------------+     +------------------+
//! | ValuationRequest | --> |    Provider      | --> |    Valuation     |
//! +------------------+     |  (IGCP, fakes)   |     |  or FetchError   |
//!                          +------------------+     +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`Series`] - The fixed set of Aforro series (A to F)
//! - [`ValuationRequest`] - Parameters for valuing one subscription
//! - [`Valuation`] - Current value of one subscription in EUR
//! - [`ValuationProvider`] - Trait implemented by pricing sources
//! - [`FetchError`] - Uniform per-subscription failure

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::FetchError;

// Re-export all public types from models
pub use models::{Currency, ParseSeriesError, Series, Valuation, ValuationRequest, EUR};

// Re-export provider types
pub use provider::igcp::IgcpProvider;
pub use provider::ValuationProvider;

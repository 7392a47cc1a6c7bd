//! Aforro Core - subscriptions, aggregation and report rendering.
//!
//! This crate turns a list of Certificados de Aforro subscriptions into the
//! static HTML page that exposes the portfolio's current/invested ratio.
//! Valuations come from any [`aforro_market_data::ValuationProvider`].

pub mod constants;
pub mod errors;
pub mod pipeline;
pub mod portfolio;
pub mod report;
pub mod subscriptions;

// Re-export common types
pub use pipeline::*;
pub use portfolio::*;
pub use report::*;
pub use subscriptions::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;

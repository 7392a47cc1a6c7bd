//! Valuation data models
//!
//! This module contains the data types exchanged with valuation providers:
//! - `types` - Currency alias and the EUR constant
//! - `series` - The fixed set of Certificados de Aforro series (Series)
//! - `request` - What a provider needs to value one subscription (ValuationRequest)
//! - `valuation` - The value a provider returns (Valuation)

mod request;
mod series;
mod types;
mod valuation;

pub use request::ValuationRequest;
pub use series::{ParseSeriesError, Series};
pub use types::{Currency, EUR};
pub use valuation::Valuation;

//! Valuation provider trait definitions.

use async_trait::async_trait;

use crate::errors::FetchError;
use crate::models::{Valuation, ValuationRequest};

/// Trait for valuation providers.
///
/// Implement this trait to add support for a new pricing source, or to
/// stand in for the network in tests.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use aforro_market_data::{FetchError, Valuation, ValuationProvider, ValuationRequest};
///
/// struct FixedProvider;
///
/// #[async_trait]
/// impl ValuationProvider for FixedProvider {
///     fn id(&self) -> &'static str {
///         "FIXED"
///     }
///
///     async fn fetch_valuation(
///         &self,
///         request: &ValuationRequest,
///     ) -> Result<Valuation, FetchError> {
///         // ...
///     }
/// }
/// ```
#[async_trait]
pub trait ValuationProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "IGCP".
    /// Used for logging and as the `source` of returned valuations.
    fn id(&self) -> &'static str;

    /// Fetch the current value of one subscription.
    ///
    /// Exactly one attempt is made. Transport failures, non-success
    /// statuses and unusable payloads are all reported as `FetchError`.
    async fn fetch_valuation(&self, request: &ValuationRequest) -> Result<Valuation, FetchError>;
}

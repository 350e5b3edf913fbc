//! Rate provider port trait.
//!
//! The remote exchange-rate service, seen from inside the hexagon.
//! The HTTP adapter implements this; tests substitute scripted mocks.

use std::collections::HashMap;

use crate::domain::CurrencyCode;
use crate::error::RateError;

/// Port trait for the remote exchange-rate provider.
///
/// One call is one network attempt: retry, caching and fallback are layered
/// on top by the conversion service, never inside an implementation.
#[async_trait::async_trait]
pub trait RateProvider: Send + Sync + 'static {
    /// Converts `amount` units of `from` into `to` via the provider's pair
    /// endpoint, returning the converted amount.
    async fn pair_rate(
        &self,
        from: CurrencyCode,
        to: CurrencyCode,
        amount: f64,
    ) -> Result<f64, RateError>;

    /// Latest per-unit rates quoted against `base`.
    /// Keys are raw provider codes; validation happens in the core.
    async fn latest_rates(&self, base: CurrencyCode) -> Result<HashMap<String, f64>, RateError>;

    /// Raw `[code, name]` pairs for every currency the provider supports.
    async fn supported_codes(&self) -> Result<Vec<(String, String)>, RateError>;
}

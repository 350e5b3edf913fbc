//! Conversion application service.
//!
//! Orchestrates the provider port, retry policy, rate cache and currency
//! catalog behind one public surface. Contains NO transport logic - pure
//! orchestration.

use std::collections::HashMap;
use std::sync::Arc;

use converter_types::{
    Conversion, ConversionRequest, ConvertError, Currency, CurrencyCode, RateError, RateProvider,
};

use crate::cache::{CachedRate, RateCache};
use crate::catalog::CurrencyCatalog;
use crate::retry::{ErrorClass, RetryPolicy};

/// Application service for currency conversion.
///
/// Generic over `P: RateProvider` - the adapter is injected at construction
/// time. This enables:
/// - Swapping providers without code changes
/// - Testing with scripted mock providers
/// - One shared connection pool per process (the `Arc`)
///
/// The rate cache and currency catalog are owned here, not process-wide
/// globals: construct one service per provider and share it.
pub struct ConversionService<P: RateProvider> {
    provider: Arc<P>,
    retry: RetryPolicy,
    rates: RateCache,
    catalog: CurrencyCatalog<P>,
}

impl<P: RateProvider> ConversionService<P> {
    /// Creates a service with the default retry policy.
    pub fn new(provider: Arc<P>) -> Self {
        Self::with_retry(provider, RetryPolicy::default())
    }

    /// Creates a service with an explicit retry policy.
    pub fn with_retry(provider: Arc<P>, retry: RetryPolicy) -> Self {
        Self {
            catalog: CurrencyCatalog::new(provider.clone()),
            rates: RateCache::new(),
            retry,
            provider,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Conversion
    // ─────────────────────────────────────────────────────────────────────────────

    /// Converts the requested amount, live first, cached rate second.
    ///
    /// Identity conversions return immediately with no network call. A
    /// live success with a positive amount refreshes the rate cache. When
    /// the live path is spent - retry exhausted or a fatal error - a cache
    /// hit still produces a success, marked stale; only a cache miss
    /// surfaces the failure.
    pub async fn convert(&self, req: ConversionRequest) -> Result<Conversion, ConvertError> {
        if req.is_identity() {
            return Ok(Conversion::live(req.amount()));
        }

        let (from, to, amount) = (req.from_currency(), req.to_currency(), req.amount());
        let provider = &*self.provider;

        let mut attempts = 0u32;
        let outcome = self
            .retry
            .run(classify, || {
                attempts += 1;
                provider.pair_rate(from, to, amount)
            })
            .await;

        match outcome {
            Ok(result) => {
                if amount > 0.0 {
                    // Normalize to a per-unit rate so any amount can be
                    // reconstructed from the cached value later.
                    self.rates.put(from, to, result / amount);
                }
                Ok(Conversion::live(result))
            }
            Err(err) => match self.rates.get(from, to) {
                Some(cached) => {
                    tracing::info!(
                        %from,
                        %to,
                        as_of = %cached.fetched_at,
                        "live conversion failed, falling back to cached rate: {err}"
                    );
                    Ok(Conversion::cached(cached.rate * amount, cached.fetched_at))
                }
                None => Err(ConvertError::exhausted(attempts, err)),
            },
        }
    }

    /// Boundary wrapper for raw text input.
    ///
    /// Blank or malformed input - currencies failing validation,
    /// non-numeric or negative amounts - short-circuits to `Ok(None)`
    /// without ever reaching the transport layer. Well-formed input is
    /// converted normally.
    pub async fn convert_input(
        &self,
        from: &str,
        to: &str,
        amount: &str,
    ) -> Result<Option<Conversion>, ConvertError> {
        let (Ok(from), Ok(to)) = (
            CurrencyCode::new(from.trim()),
            CurrencyCode::new(to.trim()),
        ) else {
            return Ok(None);
        };

        let Ok(parsed) = amount.trim().parse::<f64>() else {
            return Ok(None);
        };
        let Ok(req) = ConversionRequest::new(from, to, parsed) else {
            return Ok(None);
        };

        self.convert(req).await.map(Some)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Read paths
    // ─────────────────────────────────────────────────────────────────────────────

    /// All supported currencies (memoized after the first success).
    pub async fn all_currencies(&self) -> Result<Vec<Currency>, RateError> {
        self.catalog.all_currencies().await
    }

    /// Latest per-unit rates quoted against `base`, keyed by validated
    /// code; entries whose code fails validation are dropped.
    pub async fn latest_rates(
        &self,
        base: CurrencyCode,
    ) -> Result<HashMap<CurrencyCode, f64>, RateError> {
        let raw = self.provider.latest_rates(base).await?;
        Ok(raw
            .into_iter()
            .filter_map(|(code, rate)| Some((CurrencyCode::new(&code).ok()?, rate)))
            .collect())
    }

    /// Last-known cached rate for a pair, for callers that render
    /// staleness alongside a result.
    pub fn cached_rate(&self, from: CurrencyCode, to: CurrencyCode) -> Option<CachedRate> {
        self.rates.get(from, to)
    }
}

fn classify(err: &RateError) -> ErrorClass {
    if err.is_transient() {
        ErrorClass::Transient
    } else {
        ErrorClass::Fatal
    }
}

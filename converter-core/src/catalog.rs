//! Memoized supported-currency catalog.

use std::sync::Arc;

use tokio::sync::OnceCell;

use converter_types::{Currency, CurrencyCode, RateError, RateProvider};

/// Fetches and memoizes the provider's supported-currency list.
///
/// The first successful fetch is cached for the process lifetime, and
/// concurrent first callers are collapsed onto a single network call. A
/// failed fetch leaves the cell empty, so the next caller tries again;
/// there is no pre-seeded fallback.
pub struct CurrencyCatalog<P> {
    provider: Arc<P>,
    cached: OnceCell<Vec<Currency>>,
}

impl<P: RateProvider> CurrencyCatalog<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self {
            provider,
            cached: OnceCell::new(),
        }
    }

    /// All supported currencies, order-preserving.
    ///
    /// Entries whose code fails validation or whose name is blank are
    /// discarded rather than failing the whole list.
    pub async fn all_currencies(&self) -> Result<Vec<Currency>, RateError> {
        let list = self
            .cached
            .get_or_try_init(|| async {
                let raw = self.provider.supported_codes().await?;
                let currencies = filter_currencies(raw);
                tracing::debug!(count = currencies.len(), "currency catalog populated");
                Ok(currencies)
            })
            .await?;
        Ok(list.clone())
    }
}

fn filter_currencies(raw: Vec<(String, String)>) -> Vec<Currency> {
    raw.into_iter()
        .filter_map(|(code, name)| {
            let code = CurrencyCode::new(&code).ok()?;
            if name.trim().is_empty() {
                return None;
            }
            Some(Currency::new(code, name))
        })
        .collect()
}

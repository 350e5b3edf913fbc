//! Conversion request and outcome types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::CurrencyCode;
use crate::error::DomainError;

/// A validated request to convert `amount` units of one currency into
/// another.
///
/// Exists only for the duration of a single `convert` call; the amount is
/// guaranteed finite and non-negative by construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionRequest {
    from: CurrencyCode,
    to: CurrencyCode,
    amount: f64,
}

impl ConversionRequest {
    /// Creates a request. Rejects negative, NaN and infinite amounts.
    pub fn new(from: CurrencyCode, to: CurrencyCode, amount: f64) -> Result<Self, DomainError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(DomainError::InvalidAmount(amount));
        }
        Ok(Self { from, to, amount })
    }

    pub fn from_currency(&self) -> CurrencyCode {
        self.from
    }

    pub fn to_currency(&self) -> CurrencyCode {
        self.to
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// An identity conversion needs no rate at all.
    pub fn is_identity(&self) -> bool {
        self.from == self.to
    }
}

/// Whether a conversion came from a live provider response or was
/// reconstructed from the last-known-rate cache.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Freshness {
    Live,
    CachedFallback { as_of: DateTime<Utc> },
}

/// A successful conversion outcome.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Conversion {
    pub amount: f64,
    pub freshness: Freshness,
}

impl Conversion {
    pub fn live(amount: f64) -> Self {
        Self {
            amount,
            freshness: Freshness::Live,
        }
    }

    pub fn cached(amount: f64, as_of: DateTime<Utc>) -> Self {
        Self {
            amount,
            freshness: Freshness::CachedFallback { as_of },
        }
    }

    /// True when the amount was computed from a cached rate rather than a
    /// live response.
    pub fn is_stale(&self) -> bool {
        matches!(self.freshness, Freshness::CachedFallback { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> CurrencyCode {
        CurrencyCode::new(s).unwrap()
    }

    #[test]
    fn test_valid_request() {
        let req = ConversionRequest::new(code("USD"), code("EUR"), 10.5).unwrap();
        assert_eq!(req.amount(), 10.5);
        assert!(!req.is_identity());
    }

    #[test]
    fn test_zero_amount_allowed() {
        assert!(ConversionRequest::new(code("USD"), code("EUR"), 0.0).is_ok());
    }

    #[test]
    fn test_negative_amount_rejected() {
        let result = ConversionRequest::new(code("USD"), code("EUR"), -1.0);
        assert!(matches!(result, Err(DomainError::InvalidAmount(_))));
    }

    #[test]
    fn test_non_finite_amount_rejected() {
        assert!(ConversionRequest::new(code("USD"), code("EUR"), f64::NAN).is_err());
        assert!(ConversionRequest::new(code("USD"), code("EUR"), f64::INFINITY).is_err());
    }

    #[test]
    fn test_identity_detection() {
        let req = ConversionRequest::new(code("USD"), code("USD"), 5.0).unwrap();
        assert!(req.is_identity());
    }

    #[test]
    fn test_freshness_markers() {
        assert!(!Conversion::live(1.0).is_stale());
        assert!(Conversion::cached(1.0, Utc::now()).is_stale());
    }
}

//! Currency identity types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A 3-letter uppercase ISO-4217-shaped currency code.
///
/// Values can only be constructed through the validating factory, so a held
/// `CurrencyCode` is always well-formed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode([u8; 3]);

impl CurrencyCode {
    /// Validates and wraps a currency code.
    ///
    /// Accepts exactly three ASCII uppercase letters; anything else is
    /// rejected, including lowercase and whitespace-padded input.
    pub fn new(code: &str) -> Result<Self, DomainError> {
        let bytes = code.as_bytes();
        if bytes.len() == 3 && bytes.iter().all(|b| b.is_ascii_uppercase()) {
            Ok(Self([bytes[0], bytes[1], bytes[2]]))
        } else {
            Err(DomainError::InvalidCurrencyCode(code.to_string()))
        }
    }

    /// Returns true if `code` would pass validation.
    pub fn is_valid(code: &str) -> bool {
        Self::new(code).is_ok()
    }

    pub fn as_str(&self) -> &str {
        // Invariant: only ASCII uppercase bytes are ever stored.
        std::str::from_utf8(&self.0).expect("currency code is ASCII")
    }
}

impl fmt::Debug for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CurrencyCode({})", self.as_str())
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CurrencyCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.as_str().to_string()
    }
}

impl AsRef<str> for CurrencyCode {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// A supported currency: display name plus its code.
///
/// Produced by parsing the provider's supported-codes list; entries with
/// invalid codes or blank names never make it into one of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    pub code: CurrencyCode,
    pub name: String,
}

impl Currency {
    pub fn new(code: CurrencyCode, name: impl Into<String>) -> Self {
        Self {
            code,
            name: name.into(),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_code() {
        let code = CurrencyCode::new("USD").unwrap();
        assert_eq!(code.as_str(), "USD");
        assert_eq!(code.to_string(), "USD");
    }

    #[test]
    fn test_lowercase_rejected() {
        assert!(CurrencyCode::new("usd").is_err());
    }

    #[test]
    fn test_wrong_length_rejected() {
        assert!(CurrencyCode::new("US").is_err());
        assert!(CurrencyCode::new("USDT").is_err());
        assert!(CurrencyCode::new("").is_err());
    }

    #[test]
    fn test_non_alphabetic_rejected() {
        assert!(CurrencyCode::new("U$D").is_err());
        assert!(CurrencyCode::new("U D").is_err());
        assert!(CurrencyCode::new("123").is_err());
    }

    #[test]
    fn test_is_valid() {
        assert!(CurrencyCode::is_valid("EUR"));
        assert!(!CurrencyCode::is_valid("eur"));
    }

    #[test]
    fn test_from_str() {
        let code: CurrencyCode = "GBP".parse().unwrap();
        assert_eq!(code.as_str(), "GBP");
    }

    #[test]
    fn test_serde_round_trip() {
        let code = CurrencyCode::new("JPY").unwrap();
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "\"JPY\"");
        let back: CurrencyCode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, code);
    }

    #[test]
    fn test_deserialize_invalid_rejected() {
        let result: Result<CurrencyCode, _> = serde_json::from_str("\"usd\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_currency_display() {
        let currency = Currency::new(CurrencyCode::new("USD").unwrap(), "United States Dollar");
        assert_eq!(currency.to_string(), "United States Dollar (USD)");
    }
}

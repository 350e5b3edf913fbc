//! # Converter Client
//!
//! A typed reqwest adapter for the exchangerate-api.com v6 API.
//!
//! Implements the [`RateProvider`] port: one call here is one network
//! attempt. Retry, caching and fallback live in `converter-core`, never
//! in this crate.

pub mod dto;

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use converter_types::{CurrencyCode, ProviderErrorCode, RateError, RateProvider};

use crate::dto::{CodesResponse, ErrorEnvelope, LatestResponse, PairResponse};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// HTTP client for the rate provider.
///
/// Holds a single `reqwest::Client` (connection pool) for the process
/// lifetime; construct once and share behind an `Arc`.
pub struct ExchangeRateClient {
    base_url: String,
    api_key: String,
    http: Client,
}

impl ExchangeRateClient {
    /// Creates a new client.
    ///
    /// `base_url` and `api_key` are opaque, injected strings; the key is
    /// embedded in request paths and therefore never logged verbatim.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let http = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to construct http client");

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            http,
        }
    }

    fn url(&self, tail: &str) -> String {
        format!("{}/{}/{}", self.base_url, self.api_key, tail)
    }

    async fn get_json<T: DeserializeOwned>(&self, tail: &str) -> Result<T, RateError> {
        tracing::debug!("GET {}/****/{}", self.base_url, tail);

        let resp = self.http.get(self.url(tail)).send().await.map_err(|e| {
            RateError::Network {
                message: redact(&e.to_string(), &self.api_key),
            }
        })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| RateError::Network {
            message: redact(&e.to_string(), &self.api_key),
        })?;

        decode_body(status, &body)
    }
}

// The api key must never leak through Debug output.
impl fmt::Debug for ExchangeRateClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExchangeRateClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"****")
            .finish()
    }
}

#[async_trait::async_trait]
impl RateProvider for ExchangeRateClient {
    async fn pair_rate(
        &self,
        from: CurrencyCode,
        to: CurrencyCode,
        amount: f64,
    ) -> Result<f64, RateError> {
        let resp: PairResponse = self
            .get_json(&format!("pair/{from}/{to}/{amount}"))
            .await?;
        check_result(resp.result.as_deref(), resp.error_type.as_deref())?;
        Ok(resp.conversion_result)
    }

    async fn latest_rates(&self, base: CurrencyCode) -> Result<HashMap<String, f64>, RateError> {
        let resp: LatestResponse = self.get_json(&format!("latest/{base}")).await?;
        check_result(resp.result.as_deref(), resp.error_type.as_deref())?;
        Ok(resp.conversion_rates)
    }

    async fn supported_codes(&self) -> Result<Vec<(String, String)>, RateError> {
        let resp: CodesResponse = self.get_json("codes").await?;
        check_result(resp.result.as_deref(), resp.error_type.as_deref())?;
        Ok(collapse_pairs(resp.supported_codes))
    }
}

/// Maps a body's `result`/`error-type` pair onto a provider error.
fn check_result(result: Option<&str>, error_type: Option<&str>) -> Result<(), RateError> {
    if result == Some("error") {
        return Err(RateError::Provider {
            code: ProviderErrorCode::parse(error_type.unwrap_or("unknown-error")),
        });
    }
    Ok(())
}

/// Decodes a response body according to its HTTP status.
///
/// The provider ships business errors with 4xx statuses AND an error
/// envelope in the body; those become `Provider` errors so the reason code
/// survives. A non-2xx without an envelope is a bare transport failure.
fn decode_body<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T, RateError> {
    if !status.is_success() {
        if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
            if let Some(code) = envelope.error_type.as_deref() {
                return Err(RateError::Provider {
                    code: ProviderErrorCode::parse(code),
                });
            }
        }
        return Err(RateError::Http {
            status: status.as_u16(),
        });
    }

    serde_json::from_str(body).map_err(|e| RateError::Malformed {
        message: e.to_string(),
    })
}

/// Collapses raw `[code, name]` arrays into pairs, dropping short entries.
fn collapse_pairs(raw: Vec<Vec<String>>) -> Vec<(String, String)> {
    raw.into_iter()
        .filter_map(|entry| {
            let mut fields = entry.into_iter();
            match (fields.next(), fields.next()) {
                (Some(code), Some(name)) => Some((code, name)),
                _ => None,
            }
        })
        .collect()
}

/// Blanks out the api key anywhere it appears in a message destined for
/// logs or error chains.
fn redact(message: &str, api_key: &str) -> String {
    if api_key.is_empty() {
        return message.to_string();
    }
    message.replace(api_key, "****")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = ExchangeRateClient::new("https://v6.exchangerate-api.com/v6", "test-key");
        assert_eq!(client.base_url, "https://v6.exchangerate-api.com/v6");
    }

    #[test]
    fn test_client_with_trailing_slash() {
        let client = ExchangeRateClient::new("https://v6.exchangerate-api.com/v6/", "test-key");
        assert_eq!(client.base_url, "https://v6.exchangerate-api.com/v6");
    }

    #[test]
    fn test_url_embeds_key() {
        let client = ExchangeRateClient::new("https://api.example.com", "secret");
        assert_eq!(
            client.url("pair/USD/EUR/10"),
            "https://api.example.com/secret/pair/USD/EUR/10"
        );
    }

    #[test]
    fn test_debug_hides_key() {
        let client = ExchangeRateClient::new("https://api.example.com", "secret");
        let printed = format!("{:?}", client);
        assert!(!printed.contains("secret"));
        assert!(printed.contains("****"));
    }

    #[test]
    fn test_redact() {
        let message = "error sending request for url https://x/abc123/pair/USD/EUR/1";
        assert_eq!(
            redact(message, "abc123"),
            "error sending request for url https://x/****/pair/USD/EUR/1"
        );
        assert_eq!(redact(message, ""), message);
    }

    #[test]
    fn test_decode_success_body() {
        let body = r#"{"result": "success", "conversion_result": 9.2}"#;
        let resp: PairResponse = decode_body(StatusCode::OK, body).unwrap();
        assert_eq!(resp.conversion_result, 9.2);
    }

    #[test]
    fn test_decode_malformed_success_body() {
        let err = decode_body::<PairResponse>(StatusCode::OK, "not json").unwrap_err();
        assert!(matches!(err, RateError::Malformed { .. }));
        assert!(!err.is_transient());
    }

    #[test]
    fn test_decode_error_status_with_envelope() {
        let body = r#"{"result": "error", "error-type": "invalid-key"}"#;
        let err = decode_body::<PairResponse>(StatusCode::FORBIDDEN, body).unwrap_err();
        assert_eq!(
            err,
            RateError::Provider {
                code: ProviderErrorCode::InvalidKey
            }
        );
    }

    #[test]
    fn test_decode_error_status_without_envelope() {
        let err = decode_body::<PairResponse>(StatusCode::BAD_GATEWAY, "oops").unwrap_err();
        assert_eq!(err, RateError::Http { status: 502 });
        assert!(err.is_transient());
    }

    #[test]
    fn test_check_result_flags_provider_error() {
        let err = check_result(Some("error"), Some("quota-reached")).unwrap_err();
        assert_eq!(
            err,
            RateError::Provider {
                code: ProviderErrorCode::QuotaReached
            }
        );
    }

    #[test]
    fn test_check_result_passes_success() {
        assert!(check_result(Some("success"), None).is_ok());
        assert!(check_result(None, None).is_ok());
    }

    #[test]
    fn test_check_result_unknown_error_type() {
        let err = check_result(Some("error"), None).unwrap_err();
        assert_eq!(
            err,
            RateError::Provider {
                code: ProviderErrorCode::Other("unknown-error".into())
            }
        );
    }

    #[test]
    fn test_collapse_pairs_drops_short_entries() {
        let raw = vec![
            vec!["USD".to_string(), "United States Dollar".to_string()],
            vec!["EUR".to_string()],
            vec![],
        ];
        let pairs = collapse_pairs(raw);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].0, "USD");
    }
}

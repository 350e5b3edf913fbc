//! Error types for the conversion service.
//!
//! Three layers, mirroring how far a failure travels:
//! - [`DomainError`] - invalid values rejected at construction time
//! - [`RateError`] - a single failed provider attempt, before retry/fallback
//! - [`ConvertError`] - what callers see when every recovery path is spent

use std::fmt;

/// Domain-level validation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    #[error("Invalid currency code: {0:?}")]
    InvalidCurrencyCode(String),

    #[error("Amount must be finite and non-negative, got {0}")]
    InvalidAmount(f64),
}

/// Machine-readable failure reasons returned by the rate provider in its
/// `error-type` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderErrorCode {
    UnsupportedCode,
    MalformedRequest,
    InvalidKey,
    InactiveAccount,
    QuotaReached,
    /// Any code this build does not know about yet; carried verbatim.
    Other(String),
}

impl ProviderErrorCode {
    pub fn parse(code: &str) -> Self {
        match code {
            "unsupported-code" => Self::UnsupportedCode,
            "malformed-request" => Self::MalformedRequest,
            "invalid-key" => Self::InvalidKey,
            "inactive-account" => Self::InactiveAccount,
            "quota-reached" => Self::QuotaReached,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::UnsupportedCode => "unsupported-code",
            Self::MalformedRequest => "malformed-request",
            Self::InvalidKey => "invalid-key",
            Self::InactiveAccount => "inactive-account",
            Self::QuotaReached => "quota-reached",
            Self::Other(code) => code,
        }
    }

    /// Short, category-specific message suitable for direct display.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::UnsupportedCode => "This currency is not supported.",
            Self::MalformedRequest => "The conversion request was rejected. Try different values.",
            Self::InvalidKey => "The API key was rejected. Check your configuration.",
            Self::InactiveAccount => "The API account is inactive.",
            Self::QuotaReached => "API quota reached. Try again later.",
            Self::Other(_) => "The exchange rate service rejected the request.",
        }
    }
}

impl fmt::Display for ProviderErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single failed provider attempt, before any retry or fallback handling.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RateError {
    /// A well-formed response signaling a business-level failure.
    #[error("provider error: {code}")]
    Provider { code: ProviderErrorCode },

    /// Non-2xx HTTP status without a provider error envelope.
    #[error("unexpected http status {status}")]
    Http { status: u16 },

    /// Connection-level failure: refused, timed out, body read aborted.
    #[error("network failure: {message}")]
    Network { message: String },

    /// A 2xx body that could not be decoded into the expected shape.
    #[error("malformed response: {message}")]
    Malformed { message: String },
}

impl RateError {
    /// Whether a retry has any chance of succeeding.
    ///
    /// Connection-level failures, 5xx, 429 and 408 are worth retrying;
    /// provider rejections, other 4xx and undecodable bodies will recur.
    pub fn is_transient(&self) -> bool {
        match self {
            RateError::Network { .. } => true,
            RateError::Http { status } => matches!(*status, 408 | 429 | 500..=599),
            RateError::Provider { .. } | RateError::Malformed { .. } => false,
        }
    }
}

/// Caller-facing conversion failure.
///
/// Only produced when the live fetch failed (after retry where applicable)
/// AND no cached rate existed for the pair; a cache hit turns the same
/// situation into a stale success instead.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConvertError {
    /// The provider rejected the request; retrying cannot help.
    #[error("provider rejected the conversion: {0}")]
    Provider(ProviderErrorCode),

    /// Transport-level failures exhausted the retry budget.
    #[error("conversion failed after {attempts} attempt(s): {source}")]
    Transport { attempts: u32, source: RateError },
}

impl ConvertError {
    /// Lowers the last attempt's error once retry and fallback are spent.
    pub fn exhausted(attempts: u32, last: RateError) -> Self {
        match last {
            RateError::Provider { code } => Self::Provider(code),
            other => Self::Transport {
                attempts,
                source: other,
            },
        }
    }

    /// Short, category-specific message suitable for direct display.
    /// Never a raw exception string.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Provider(code) => code.user_message(),
            Self::Transport { .. } => "Network error. Check your connection.",
        }
    }
}

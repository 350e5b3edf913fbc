//! # Converter Types
//!
//! Domain types and port traits for the currency conversion service.
//! This crate has ZERO external IO dependencies - only data structures,
//! validation rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (CurrencyCode, ConversionRequest, Conversion)
//! - `ports/` - Trait definitions that adapters must implement
//! - `error/` - Domain, provider and caller-facing error types

pub mod domain;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{Conversion, ConversionRequest, Currency, CurrencyCode, Freshness};
pub use error::{ConvertError, DomainError, ProviderErrorCode, RateError};
pub use ports::RateProvider;

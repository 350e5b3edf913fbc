//! Response shapes for the exchangerate-api.com v6 endpoints.
//!
//! Field names follow the provider's wire format; every response carries a
//! `result` status and, on failure, an `error-type` reason code.

use std::collections::HashMap;

use serde::Deserialize;

/// Body of `GET {base}/{key}/pair/{from}/{to}/{amount}`.
#[derive(Debug, Deserialize)]
pub struct PairResponse {
    pub result: Option<String>,
    #[serde(rename = "error-type")]
    pub error_type: Option<String>,
    #[serde(default)]
    pub conversion_result: f64,
    pub base_code: Option<String>,
    pub target_code: Option<String>,
}

/// Body of `GET {base}/{key}/latest/{base_code}`.
#[derive(Debug, Deserialize)]
pub struct LatestResponse {
    pub result: Option<String>,
    #[serde(rename = "error-type")]
    pub error_type: Option<String>,
    pub base_code: Option<String>,
    #[serde(default)]
    pub conversion_rates: HashMap<String, f64>,
}

/// Body of `GET {base}/{key}/codes`.
///
/// `supported_codes` arrives as an array of `[code, name]` arrays; entries
/// of other arities are tolerated here and dropped during collapsing.
#[derive(Debug, Deserialize)]
pub struct CodesResponse {
    pub result: Option<String>,
    #[serde(rename = "error-type")]
    pub error_type: Option<String>,
    #[serde(default)]
    pub supported_codes: Vec<Vec<String>>,
}

/// Minimal envelope used to pull `error-type` out of non-2xx bodies.
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub result: Option<String>,
    #[serde(rename = "error-type")]
    pub error_type: Option<String>,
}

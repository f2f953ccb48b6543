//! Validated query parameters for the per-symbol rating endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::types::Params;
use crate::errors::FmpError;

/// Query for the historical rating and rating endpoints.
///
/// `symbol` holds one or more comma-separated tickers, e.g. `"AAPL,MSFT"`.
/// Only the validating constructors can build one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HistoricalRatingQueryParams {
    symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<u32>,
}

/// Host parameters as received, before validation.
#[derive(Deserialize)]
struct RawQuery {
    symbol: String,
    #[serde(default)]
    limit: Option<u32>,
}

impl HistoricalRatingQueryParams {
    /// Create validated query params for the given symbol list.
    pub fn new(symbol: impl Into<String>) -> Result<Self, FmpError> {
        Self::validated(symbol.into(), None)
    }

    /// Set the per-symbol record limit.
    pub fn with_limit(self, limit: u32) -> Result<Self, FmpError> {
        Self::validated(self.symbol, Some(limit))
    }

    /// Build and validate query params from a raw host mapping.
    ///
    /// Unknown keys are ignored.
    pub fn from_params(params: &Params) -> Result<Self, FmpError> {
        let raw: RawQuery = serde_json::from_value(Value::Object(params.clone()))
            .map_err(|e| FmpError::validation(format!("Invalid query parameters: {}", e)))?;
        Self::validated(raw.symbol, raw.limit)
    }

    /// Comma-separated symbols, as given.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Maximum number of records per symbol (FMP `limit` parameter).
    pub fn limit(&self) -> Option<u32> {
        self.limit
    }

    /// The individual symbols, in the order given. Duplicates are kept.
    pub fn symbols(&self) -> Vec<String> {
        split_symbols(&self.symbol)
    }

    fn validated(symbol: String, limit: Option<u32>) -> Result<Self, FmpError> {
        if split_symbols(&symbol).is_empty() {
            return Err(FmpError::validation("symbol must not be empty"));
        }
        if limit == Some(0) {
            return Err(FmpError::validation("limit must be greater than zero"));
        }
        Ok(Self { symbol, limit })
    }
}

fn split_symbols(symbol: &str) -> Vec<String> {
    symbol
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

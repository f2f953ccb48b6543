use std::sync::Arc;

use futures::future::join_all;
use reqwest::Url;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::{FetchDiagnostics, RawBatch};
use crate::client::{parse_records, HttpClient};
use crate::config::FmpConfig;
use crate::errors::FmpError;
use crate::helpers::{create_url, normalize_keys};
use crate::models::{Credentials, HistoricalRatingQueryParams, RawRecord, API_KEY_CREDENTIAL};

/// FMP API version used by the per-symbol endpoints.
pub const API_VERSION: u8 = 3;

/// An FMP endpoint of the form `/api/v3/{path}/{symbol}`.
///
/// Handles the fan-out over the query's symbols, empty-symbol warnings and
/// key normalization; fetchers built on it only differ in `path`.
#[derive(Clone)]
pub struct SymbolEndpoint {
    path: &'static str,
    client: Arc<dyn HttpClient>,
    config: FmpConfig,
}

impl SymbolEndpoint {
    pub fn new(path: &'static str, client: Arc<dyn HttpClient>, config: FmpConfig) -> Self {
        Self {
            path,
            client,
            config,
        }
    }

    /// Full request URL for one symbol.
    pub fn url(
        &self,
        symbol: &str,
        query: &HistoricalRatingQueryParams,
        api_key: Option<&str>,
    ) -> Result<Url, FmpError> {
        let mut params = Vec::new();
        if let Some(limit) = query.limit() {
            params.push(("limit", limit.to_string()));
        }
        if let Some(key) = api_key {
            params.push(("apikey", key.to_string()));
        }

        let endpoint = format!("{}/{}", self.path, urlencoding::encode(symbol));
        create_url(&self.config.base_url, API_VERSION, &endpoint, &params)
    }

    /// Fetch every symbol of the query concurrently and merge the results.
    ///
    /// Records are merged in symbol order, whatever order the responses
    /// arrived in. A symbol without data only produces a warning; the call
    /// fails with [`FmpError::EmptyData`] if no symbol produced anything. A
    /// transport or upstream error fails the call once all requests are done.
    pub async fn extract(
        &self,
        query: &HistoricalRatingQueryParams,
        credentials: Option<&Credentials>,
    ) -> Result<RawBatch, FmpError> {
        let symbols = query.symbols();
        let api_key = self.api_key(credentials);

        let urls = symbols
            .iter()
            .map(|symbol| self.url(symbol, query, api_key.as_deref()))
            .collect::<Result<Vec<_>, _>>()?;

        let requests = symbols
            .iter()
            .zip(&urls)
            .map(|(symbol, url)| async move { (symbol, self.fetch_symbol(symbol, url.as_str()).await) });
        let responses = join_all(requests).await;

        let mut diagnostics = FetchDiagnostics::new();
        let mut records: Vec<RawRecord> = Vec::new();

        for (symbol, result) in responses {
            let batch = result?;
            if batch.is_empty() {
                warn!("Symbol Error: No data found for symbol {}", symbol);
                diagnostics.record_empty(symbol.as_str());
            } else {
                diagnostics.record_success(symbol.as_str(), batch.len());
                records.extend(batch);
            }
        }

        if records.is_empty() {
            return Err(FmpError::EmptyData { symbols });
        }

        info!(
            "FMP {}: fetched {} records ({})",
            self.path,
            records.len(),
            diagnostics.summary()
        );

        Ok(RawBatch {
            records: records.into_iter().map(normalize_keys).collect(),
            diagnostics,
        })
    }

    async fn fetch_symbol(&self, symbol: &str, url: &str) -> Result<Vec<RawRecord>, FmpError> {
        debug!("FMP request: {}/{}", self.path, symbol);

        let response = self.client.get(url).await?;

        if !response.is_success() {
            let message = serde_json::from_str::<Value>(&response.body)
                .ok()
                .and_then(|v| v.get("Error Message")?.as_str().map(str::to_string))
                .unwrap_or_else(|| format!("HTTP {} for symbol {}", response.status, symbol));

            return Err(FmpError::Provider {
                status: Some(response.status),
                message,
            });
        }

        parse_records(symbol, &response.body)
    }

    /// Credentials take precedence over the configured key.
    fn api_key(&self, credentials: Option<&Credentials>) -> Option<String> {
        credentials
            .and_then(|c| c.get(API_KEY_CREDENTIAL))
            .filter(|key| !key.trim().is_empty())
            .cloned()
            .or_else(|| self.config.api_key.clone())
    }
}

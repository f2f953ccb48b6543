//! HTTP transport used by the fetchers.
//!
//! Fetchers talk to FMP through the [`HttpClient`] trait so tests can swap in
//! canned responses. [`ReqwestHttpClient`] is the production transport.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::config::FmpConfig;
use crate::errors::FmpError;
use crate::models::RawRecord;

/// Status and body of a completed GET request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok_json(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport contract for outbound GET requests.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Issue a GET request. Transport failures surface as [`FmpError::Network`];
    /// non-success statuses are returned, not raised.
    async fn get(&self, url: &str) -> Result<HttpResponse, FmpError>;
}

/// Production transport backed by `reqwest`.
#[derive(Clone, Debug)]
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Build a client honouring the configured request timeout.
    pub fn new(config: &FmpConfig) -> Self {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client }
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new(&FmpConfig::default())
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(&self, url: &str) -> Result<HttpResponse, FmpError> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!("FMP responded {} with {} bytes", status, body.len());

        Ok(HttpResponse { status, body })
    }
}

/// Turn a response body into raw records.
///
/// FMP answers with a JSON array of objects. A lone object counts as one
/// record, while `{}`, `null`, `[]` and a blank body all mean "no data".
/// `{"Error Message": "..."}` is an upstream error.
pub fn parse_records(symbol: &str, body: &str) -> Result<Vec<RawRecord>, FmpError> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }

    let value: Value = serde_json::from_str(body).map_err(|e| FmpError::Parse {
        symbol: symbol.to_string(),
        message: e.to_string(),
    })?;

    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::Object(record) => Ok(record),
                other => Err(FmpError::Parse {
                    symbol: symbol.to_string(),
                    message: format!("expected an object in the response array, got {}", other),
                }),
            })
            .collect(),
        Value::Object(record) => {
            if let Some(message) = record.get("Error Message").and_then(Value::as_str) {
                return Err(FmpError::Provider {
                    status: None,
                    message: message.to_string(),
                });
            }
            if record.is_empty() {
                Ok(Vec::new())
            } else {
                Ok(vec![record])
            }
        }
        other => Err(FmpError::Parse {
            symbol: symbol.to_string(),
            message: format!("expected a JSON array, got {}", other),
        }),
    }
}

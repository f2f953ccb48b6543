//! FMP historical rating fetcher.
//!
//! Daily analyst-style ratings per symbol from `/api/v3/historical-rating/{symbol}`.
//! API documentation: https://site.financialmodelingprep.com/developer/docs

use std::sync::Arc;

use async_trait::async_trait;

use crate::client::{HttpClient, ReqwestHttpClient};
use crate::config::FmpConfig;
use crate::errors::FmpError;
use crate::fetcher::{Fetcher, RawBatch, SymbolEndpoint};
use crate::models::{Credentials, HistoricalRatingData, HistoricalRatingQueryParams, Params, RawRecord};

const PATH: &str = "historical-rating";

/// Fetches and transforms FMP historical ratings.
#[derive(Clone)]
pub struct HistoricalRatingFetcher {
    endpoint: SymbolEndpoint,
}

impl HistoricalRatingFetcher {
    /// Create a fetcher talking to FMP over `reqwest`.
    pub fn new(config: FmpConfig) -> Self {
        let client = Arc::new(ReqwestHttpClient::new(&config));
        Self::with_client(client, config)
    }

    /// Create a fetcher on top of a custom transport.
    pub fn with_client(client: Arc<dyn HttpClient>, config: FmpConfig) -> Self {
        Self {
            endpoint: SymbolEndpoint::new(PATH, client, config),
        }
    }
}

impl Default for HistoricalRatingFetcher {
    fn default() -> Self {
        Self::new(FmpConfig::default())
    }
}

#[async_trait]
impl Fetcher for HistoricalRatingFetcher {
    type Query = HistoricalRatingQueryParams;
    type Data = HistoricalRatingData;

    fn transform_query(&self, params: &Params) -> Result<Self::Query, FmpError> {
        HistoricalRatingQueryParams::from_params(params)
    }

    async fn extract_data(
        &self,
        query: &Self::Query,
        credentials: Option<&Credentials>,
    ) -> Result<RawBatch, FmpError> {
        self.endpoint.extract(query, credentials).await
    }

    fn transform_data(
        &self,
        _query: &Self::Query,
        data: Vec<RawRecord>,
    ) -> Result<Vec<Self::Data>, FmpError> {
        data.iter()
            .enumerate()
            .map(|(index, record)| HistoricalRatingData::from_raw(record, index))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use serde_json::{json, Value};

    use super::*;
    use crate::client::HttpResponse;
    use crate::models::API_KEY_CREDENTIAL;

    /// Canned responses keyed by symbol (last path segment).
    struct MockClient {
        responses: HashMap<&'static str, HttpResponse>,
        delays: HashMap<&'static str, u64>,
        call_count: AtomicUsize,
        urls: std::sync::Mutex<Vec<String>>,
    }

    impl MockClient {
        fn new(responses: &[(&'static str, &str)]) -> Self {
            Self {
                responses: responses
                    .iter()
                    .map(|(symbol, body)| (*symbol, HttpResponse::ok_json(*body)))
                    .collect(),
                delays: HashMap::new(),
                call_count: AtomicUsize::new(0),
                urls: std::sync::Mutex::new(Vec::new()),
            }
        }

        fn with_response(mut self, symbol: &'static str, response: HttpResponse) -> Self {
            self.responses.insert(symbol, response);
            self
        }

        fn with_delay(mut self, symbol: &'static str, millis: u64) -> Self {
            self.delays.insert(symbol, millis);
            self
        }

        fn calls(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }

        fn urls(&self) -> Vec<String> {
            self.urls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl HttpClient for MockClient {
        async fn get(&self, url: &str) -> Result<HttpResponse, FmpError> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            self.urls.lock().unwrap().push(url.to_string());

            let path = url.split('?').next().unwrap_or(url);
            let symbol = path.rsplit('/').next().unwrap_or_default();

            if let Some(millis) = self.delays.get(symbol) {
                tokio::time::sleep(Duration::from_millis(*millis)).await;
            }

            Ok(self
                .responses
                .get(symbol)
                .cloned()
                .unwrap_or_else(|| HttpResponse::ok_json("[]")))
        }
    }

    fn params(value: Value) -> Params {
        value.as_object().cloned().unwrap()
    }

    fn fetcher(client: Arc<MockClient>) -> HistoricalRatingFetcher {
        let config = FmpConfig::default().with_base_url("http://fmp.test");
        HistoricalRatingFetcher::with_client(client, config)
    }

    #[tokio::test]
    async fn test_single_symbol_scenario() {
        let client = Arc::new(MockClient::new(&[(
            "AAPL",
            r#"[{"Ticker":"AAPL","Rating":"B+"}]"#,
        )]));
        let fetcher = fetcher(client.clone());

        let output = fetcher
            .fetch_data(&params(json!({"symbol": "AAPL"})), None)
            .await
            .unwrap();

        assert_eq!(client.calls(), 1);
        assert_eq!(
            client.urls(),
            vec!["http://fmp.test/api/v3/historical-rating/AAPL"]
        );
        assert_eq!(output.results, vec![HistoricalRatingData::new("AAPL", "B+")]);
        assert!(output.diagnostics.warnings().is_empty());
    }

    #[tokio::test]
    async fn test_partial_empty_symbol_warns() {
        let client = Arc::new(MockClient::new(&[
            ("AAPL", r#"[{"symbol":"AAPL","rating":"B+"},{"symbol":"AAPL","rating":"A-"}]"#),
            ("ZZZZ", "[]"),
        ]));
        let fetcher = fetcher(client.clone());

        let output = fetcher
            .fetch_data(&params(json!({"symbol": "AAPL,ZZZZ"})), None)
            .await
            .unwrap();

        assert_eq!(client.calls(), 2);
        assert_eq!(output.results.len(), 2);
        assert!(output.results.iter().all(|r| r.symbol == "AAPL"));
        assert_eq!(output.diagnostics.empty_symbols(), vec!["ZZZZ"]);
    }

    #[tokio::test]
    async fn test_all_empty_is_empty_data() {
        let client = Arc::new(MockClient::new(&[("ZZZZ", "[]")]));
        let fetcher = fetcher(client.clone());

        let err = fetcher
            .fetch_data(&params(json!({"symbol": "ZZZZ"})), None)
            .await
            .unwrap_err();

        assert!(err.is_empty_data());
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test]
    async fn test_empty_symbol_fails_before_network() {
        let client = Arc::new(MockClient::new(&[]));
        let fetcher = fetcher(client.clone());

        let err = fetcher
            .fetch_data(&params(json!({"symbol": ""})), None)
            .await
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(client.calls(), 0);
    }

    #[tokio::test]
    async fn test_record_count_is_sum_of_symbols() {
        let client = Arc::new(MockClient::new(&[
            ("AAPL", r#"[{"symbol":"AAPL","rating":"B"},{"symbol":"AAPL","rating":"B"}]"#),
            ("MSFT", r#"[{"symbol":"MSFT","rating":"A"}]"#),
            ("NVDA", r#"[{"symbol":"NVDA","rating":"S"},{"symbol":"NVDA","rating":"S"},{"symbol":"NVDA","rating":"A"}]"#),
        ]));
        let fetcher = fetcher(client);
        let query = HistoricalRatingQueryParams::new("AAPL,MSFT,NVDA").unwrap();

        let batch = fetcher.extract_data(&query, None).await.unwrap();

        assert_eq!(batch.records.len(), 6);
        assert_eq!(batch.diagnostics.total_records(), 6);
    }

    #[tokio::test]
    async fn test_results_follow_symbol_order() {
        let client = Arc::new(
            MockClient::new(&[
                ("SLOW", r#"[{"symbol":"SLOW","rating":"B"}]"#),
                ("FAST", r#"[{"symbol":"FAST","rating":"A"}]"#),
            ])
            .with_delay("SLOW", 50),
        );
        let fetcher = fetcher(client);
        let query = HistoricalRatingQueryParams::new("SLOW,FAST").unwrap();

        let batch = fetcher.extract_data(&query, None).await.unwrap();
        let data = fetcher.transform_data(&query, batch.records).unwrap();

        let symbols: Vec<&str> = data.iter().map(|d| d.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["SLOW", "FAST"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_symbols_fetched_concurrently() {
        let client = Arc::new(
            MockClient::new(&[
                ("AAPL", r#"[{"symbol":"AAPL","rating":"B"}]"#),
                ("MSFT", r#"[{"symbol":"MSFT","rating":"A"}]"#),
                ("NVDA", r#"[{"symbol":"NVDA","rating":"S"}]"#),
                ("AMZN", r#"[{"symbol":"AMZN","rating":"B"}]"#),
            ])
            .with_delay("AAPL", 100)
            .with_delay("MSFT", 100)
            .with_delay("NVDA", 100)
            .with_delay("AMZN", 100),
        );
        let fetcher = fetcher(client.clone());
        let query = HistoricalRatingQueryParams::new("AAPL,MSFT,NVDA,AMZN").unwrap();

        let started = tokio::time::Instant::now();
        let batch = fetcher.extract_data(&query, None).await.unwrap();
        let elapsed = started.elapsed();

        assert_eq!(client.calls(), 4);
        assert_eq!(batch.records.len(), 4);
        assert!(
            elapsed < Duration::from_millis(200),
            "requests ran one after another: {elapsed:?}"
        );
    }

    #[tokio::test]
    async fn test_duplicate_symbols_requested_twice() {
        let client = Arc::new(MockClient::new(&[(
            "AAPL",
            r#"[{"symbol":"AAPL","rating":"B"}]"#,
        )]));
        let fetcher = fetcher(client.clone());
        let query = HistoricalRatingQueryParams::new("AAPL,AAPL").unwrap();

        let batch = fetcher.extract_data(&query, None).await.unwrap();

        assert_eq!(client.calls(), 2);
        assert_eq!(batch.records.len(), 2);
    }

    #[tokio::test]
    async fn test_extracted_keys_are_normalized() {
        let client = Arc::new(MockClient::new(&[(
            "AAPL",
            r#"[{"Ticker":"AAPL","Rating":"B+","ratingDetailsDCFScore":3}]"#,
        )]));
        let fetcher = fetcher(client);
        let query = HistoricalRatingQueryParams::new("AAPL").unwrap();

        let batch = fetcher.extract_data(&query, None).await.unwrap();
        let keys: Vec<&str> = batch.records[0].keys().map(String::as_str).collect();

        assert!(keys.contains(&"ticker"));
        assert!(keys.contains(&"rating"));
        assert!(keys.contains(&"rating_details_dcf_score"));
    }

    #[tokio::test]
    async fn test_credentials_and_limit_in_url() {
        let client = Arc::new(MockClient::new(&[(
            "AAPL",
            r#"[{"symbol":"AAPL","rating":"B"}]"#,
        )]));
        let config = FmpConfig::default()
            .with_base_url("http://fmp.test")
            .with_api_key(Some("config-key".to_string()));
        let fetcher = HistoricalRatingFetcher::with_client(client.clone(), config);

        let mut credentials = Credentials::new();
        credentials.insert(API_KEY_CREDENTIAL.to_string(), "cred-key".to_string());

        fetcher
            .fetch_data(&params(json!({"symbol": "AAPL", "limit": 2})), Some(&credentials))
            .await
            .unwrap();
        fetcher
            .fetch_data(&params(json!({"symbol": "AAPL"})), None)
            .await
            .unwrap();

        assert_eq!(
            client.urls(),
            vec![
                "http://fmp.test/api/v3/historical-rating/AAPL?limit=2&apikey=cred-key",
                "http://fmp.test/api/v3/historical-rating/AAPL?apikey=config-key",
            ]
        );
    }

    #[tokio::test]
    async fn test_http_error_status_propagates() {
        let client = Arc::new(
            MockClient::new(&[("AAPL", r#"[{"symbol":"AAPL","rating":"B"}]"#)]).with_response(
                "MSFT",
                HttpResponse {
                    status: 401,
                    body: r#"{"Error Message":"Invalid API KEY."}"#.to_string(),
                },
            ),
        );
        let fetcher = fetcher(client.clone());
        let query = HistoricalRatingQueryParams::new("AAPL,MSFT").unwrap();

        let err = fetcher.extract_data(&query, None).await.unwrap_err();

        assert_eq!(client.calls(), 2);
        match err {
            FmpError::Provider { status, message } => {
                assert_eq!(status, Some(401));
                assert_eq!(message, "Invalid API KEY.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_record_missing_rating_fails_transform() {
        let client = Arc::new(MockClient::new(&[("AAPL", r#"[{"symbol":"AAPL"}]"#)]));
        let fetcher = fetcher(client);

        let err = fetcher
            .fetch_data(&params(json!({"symbol": "AAPL"})), None)
            .await
            .unwrap_err();

        assert!(err.is_validation());
    }
}

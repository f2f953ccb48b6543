//! FMP current rating fetcher.
//!
//! Latest rating snapshot per symbol from `/api/v3/rating/{symbol}`. The
//! payload has the same shape as the historical endpoint, so both share
//! [`HistoricalRatingData`].

use std::sync::Arc;

use async_trait::async_trait;

use crate::client::{HttpClient, ReqwestHttpClient};
use crate::config::FmpConfig;
use crate::errors::FmpError;
use crate::fetcher::{Fetcher, RawBatch, SymbolEndpoint};
use crate::models::{Credentials, HistoricalRatingData, HistoricalRatingQueryParams, Params, RawRecord};

const PATH: &str = "rating";

/// Fetches and transforms the current FMP rating.
#[derive(Clone)]
pub struct RatingFetcher {
    endpoint: SymbolEndpoint,
}

impl RatingFetcher {
    pub fn new(config: FmpConfig) -> Self {
        let client = Arc::new(ReqwestHttpClient::new(&config));
        Self::with_client(client, config)
    }

    pub fn with_client(client: Arc<dyn HttpClient>, config: FmpConfig) -> Self {
        Self {
            endpoint: SymbolEndpoint::new(PATH, client, config),
        }
    }
}

impl Default for RatingFetcher {
    fn default() -> Self {
        Self::new(FmpConfig::default())
    }
}

#[async_trait]
impl Fetcher for RatingFetcher {
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

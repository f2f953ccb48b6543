//! Static provider declaration consumed by the host's plugin loader.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::client::{HttpClient, ReqwestHttpClient};
use crate::config::{FmpConfig, DEFAULT_BASE_URL};
use crate::errors::FmpError;
use crate::fetcher::{DynFetcher, FetchOutput};
use crate::models::{Credentials, Params, API_KEY_CREDENTIAL};
use crate::provider::{HistoricalRatingFetcher, RatingFetcher};

/// Registry name of the historical rating fetcher.
pub const HISTORICAL_RATING: &str = "HistoricalRating";

/// Registry name of the current rating fetcher.
pub const RATING: &str = "Rating";

/// A provider: descriptive metadata plus its fetchers, keyed by name.
///
/// Built once at startup and read-only afterwards.
pub struct ProviderRegistry {
    name: &'static str,
    description: &'static str,
    website: &'static str,
    credentials: &'static [&'static str],
    fetchers: BTreeMap<&'static str, Arc<dyn DynFetcher>>,
}

impl ProviderRegistry {
    /// Create an empty provider declaration.
    pub fn new(name: &'static str, description: &'static str, website: &'static str) -> Self {
        Self {
            name,
            description,
            website,
            credentials: &[],
            fetchers: BTreeMap::new(),
        }
    }

    /// Declare the credential names this provider understands.
    pub fn with_credentials(mut self, credentials: &'static [&'static str]) -> Self {
        self.credentials = credentials;
        self
    }

    /// Add a fetcher under `name`, replacing any previous one.
    pub fn register(mut self, name: &'static str, fetcher: Arc<dyn DynFetcher>) -> Self {
        self.fetchers.insert(name, fetcher);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    pub fn website(&self) -> &'static str {
        self.website
    }

    pub fn credentials(&self) -> &'static [&'static str] {
        self.credentials
    }

    /// Registered fetcher names, sorted.
    pub fn fetcher_names(&self) -> Vec<&'static str> {
        self.fetchers.keys().copied().collect()
    }

    /// Look up a fetcher by its registry name.
    pub fn fetcher(&self, name: &str) -> Result<&Arc<dyn DynFetcher>, FmpError> {
        self.fetchers
            .get(name)
            .ok_or_else(|| FmpError::UnknownFetcher(name.to_string()))
    }

    /// Run the named fetcher end to end and return its records as JSON.
    pub async fn fetch(
        &self,
        name: &str,
        params: &Params,
        credentials: Option<&Credentials>,
    ) -> Result<FetchOutput<Value>, FmpError> {
        let fetcher = self.fetcher(name)?;
        debug!("Dispatching {} to fetcher '{}'", self.name, name);
        fetcher.fetch_json(params, credentials).await
    }
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("name", &self.name)
            .field("website", &self.website)
            .field("credentials", &self.credentials)
            .field("fetchers", &self.fetcher_names())
            .finish()
    }
}

/// The FMP provider with every fetcher, over `reqwest`.
pub fn fmp_provider(config: FmpConfig) -> ProviderRegistry {
    let client = Arc::new(ReqwestHttpClient::new(&config));
    fmp_provider_with_client(client, config)
}

/// The FMP provider with every fetcher sharing a custom transport.
pub fn fmp_provider_with_client(client: Arc<dyn HttpClient>, config: FmpConfig) -> ProviderRegistry {
    ProviderRegistry::new("fmp", "Data provider for Financial Modeling Prep.", DEFAULT_BASE_URL)
        .with_credentials(&[API_KEY_CREDENTIAL])
        .register(
            HISTORICAL_RATING,
            Arc::new(HistoricalRatingFetcher::with_client(client.clone(), config.clone())),
        )
        .register(RATING, Arc::new(RatingFetcher::with_client(client, config)))
}

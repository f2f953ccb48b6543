use std::time::Duration;

use crate::errors::FmpError;

/// Default FMP host. Override with `FMP_BASE_URL`.
pub const DEFAULT_BASE_URL: &str = "https://financialmodelingprep.com";

const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Connection settings for the FMP API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FmpConfig {
    /// Scheme and host, without the `/api/vN` prefix and without a trailing slash.
    pub base_url: String,
    /// Fallback API key used when the caller passes no credentials.
    pub api_key: Option<String>,
    pub request_timeout: Duration,
}

impl Default for FmpConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            request_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

impl FmpConfig {
    /// Read settings from the environment (and a `.env` file, if present).
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `FMP_BASE_URL` | `https://financialmodelingprep.com` |
    /// | `FMP_API_KEY` | none |
    /// | `FMP_REQUEST_TIMEOUT_MS` | `30000` |
    pub fn from_env() -> Result<Self, FmpError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, FmpError> {
        let base_url = lookup("FMP_BASE_URL")
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let api_key = lookup("FMP_API_KEY")
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());
        let timeout_ms = match lookup("FMP_REQUEST_TIMEOUT_MS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| FmpError::Config {
                message: format!("FMP_REQUEST_TIMEOUT_MS must be an integer, got '{}'", raw),
            })?,
            None => DEFAULT_TIMEOUT_MS,
        };

        Ok(Self::default()
            .with_base_url(base_url)
            .with_api_key(api_key)
            .with_timeout(Duration::from_millis(timeout_ms)))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

//! FMP Provider Crate
//!
//! Fetches analyst ratings from the Financial Modeling Prep REST API and maps
//! them onto a fixed output schema for a host data-aggregation framework.
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! | ProviderRegistry |  (name, description, fetchers by name)
//! +------------------+
//!          |
//!          v
//! +------------------+     transform_query     +-----------------------------+
//! |     Fetcher      | ----------------------> | HistoricalRatingQueryParams |
//! +------------------+                         +-----------------------------+
//!          |
//!          | extract_data (one GET per symbol, fanned out, keys -> snake_case)
//!          v
//! +------------------+     transform_data      +----------------------+
//! |    RawBatch      | ----------------------> | HistoricalRatingData |
//! +------------------+   (static field table)  +----------------------+
//! ```
//!
//! # Core Types
//!
//! - [`ProviderRegistry`] - Provider metadata and fetcher lookup
//! - [`Fetcher`] - Validate / extract / transform contract for one endpoint
//! - [`HistoricalRatingQueryParams`] - Validated query (comma-separated symbols)
//! - [`HistoricalRatingData`] - Typed output record
//! - [`FetchDiagnostics`] - Per-symbol outcomes, including empty-symbol warnings
//! - [`FmpError`] - Error type for every operation
//!
//! # Example
//!
//! ```ignore
//! use fmp_provider::{fmp_provider, FmpConfig, HISTORICAL_RATING};
//!
//! let provider = fmp_provider(FmpConfig::from_env()?);
//! let params = serde_json::json!({"symbol": "AAPL,MSFT"});
//! let output = provider
//!     .fetch(HISTORICAL_RATING, params.as_object().unwrap(), None)
//!     .await?;
//! for (symbol, warning) in output.diagnostics.warnings() {
//!     eprintln!("{symbol}: {warning}");
//! }
//! ```

pub mod client;
pub mod config;
pub mod errors;
pub mod fetcher;
pub mod helpers;
pub mod models;
pub mod provider;
pub mod registry;

pub use client::{HttpClient, HttpResponse, ReqwestHttpClient};
pub use config::FmpConfig;
pub use errors::FmpError;

pub use fetcher::{
    DynFetcher, FetchDiagnostics, FetchOutput, Fetcher, RawBatch, SymbolAttempt, SymbolEndpoint,
};

pub use models::{
    Credentials, FieldSpec, HistoricalRatingData, HistoricalRatingQueryParams, Params, RawRecord,
    API_KEY_CREDENTIAL,
};

pub use provider::{HistoricalRatingFetcher, RatingFetcher};

pub use registry::{
    fmp_provider, fmp_provider_with_client, ProviderRegistry, HISTORICAL_RATING, RATING,
};

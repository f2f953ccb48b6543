//! Provider registry module.
//!
//! Declares the FMP provider for the host's plugin loader:
//! - Provider name, description, website and credential names
//! - Fetchers keyed by their logical name
//! - Name-based dispatch returning JSON records

mod provider_registry;

pub use provider_registry::{
    fmp_provider, fmp_provider_with_client, ProviderRegistry, HISTORICAL_RATING, RATING,
};

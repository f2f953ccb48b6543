use anyhow::Context;
use fmp_provider::{Credentials, Params, ProviderRegistry, API_KEY_CREDENTIAL};
use serde_json::{json, Value};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logs go to stderr so stdout stays valid JSON.
pub fn init_tracing() {
    let log_format = std::env::var("FMP_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

pub fn describe(provider: &ProviderRegistry) -> Value {
    json!({
        "name": provider.name(),
        "description": provider.description(),
        "website": provider.website(),
        "credentials": provider.credentials(),
        "fetchers": provider.fetcher_names(),
    })
}

pub fn build_params(symbol: &str, limit: Option<u32>) -> Params {
    let mut params = Params::new();
    params.insert("symbol".to_string(), Value::String(symbol.to_string()));
    if let Some(limit) = limit {
        params.insert("limit".to_string(), Value::from(limit));
    }
    params
}

pub fn build_credentials(api_key: Option<String>) -> Option<Credentials> {
    api_key.map(|key| {
        let mut credentials = Credentials::new();
        credentials.insert(API_KEY_CREDENTIAL.to_string(), key);
        credentials
    })
}

pub async fn fetch(
    provider: &ProviderRegistry,
    fetcher: &str,
    params: &Params,
    credentials: Option<&Credentials>,
) -> anyhow::Result<Value> {
    let output = provider
        .fetch(fetcher, params, credentials)
        .await
        .with_context(|| format!("{} fetch failed", fetcher))?;

    let warnings: Vec<String> = output
        .diagnostics
        .warnings()
        .into_iter()
        .map(|(_, warning)| warning.to_string())
        .collect();

    Ok(json!({
        "results": output.results,
        "warnings": warnings,
    }))
}

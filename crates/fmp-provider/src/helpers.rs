//! URL construction and key normalization shared by all fetchers.

use reqwest::Url;

use crate::errors::FmpError;
use crate::models::RawRecord;

/// Build an FMP endpoint URL.
///
/// `endpoint` is the path below `/api/v{version}/`, e.g.
/// `historical-rating/AAPL`. Query values are form-encoded.
pub fn create_url(
    base_url: &str,
    version: u8,
    endpoint: &str,
    query: &[(&str, String)],
) -> Result<Url, FmpError> {
    let raw = format!(
        "{}/api/v{}/{}",
        base_url.trim_end_matches('/'),
        version,
        endpoint.trim_start_matches('/')
    );

    let url = if query.is_empty() {
        Url::parse(&raw)
    } else {
        Url::parse_with_params(&raw, query)
    };

    url.map_err(|e| FmpError::Config {
        message: format!("Invalid base URL '{}': {}", base_url, e),
    })
}

/// Convert a key in camelCase, PascalCase or spaced form to snake_case.
///
/// `ratingDetailsDCFScore` becomes `rating_details_dcf_score`. Keys that are
/// already snake_case come back unchanged.
pub fn to_snake_case(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let mut out = String::with_capacity(key.len() + 4);

    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|c| c.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || next_is_lower {
                out.push('_');
            }
        }
        out.extend(ch.to_lowercase());
    }

    let mut snake = out.replace(' ', "_");
    while snake.contains("__") {
        snake = snake.replace("__", "_");
    }
    snake
}

/// Rewrite every key of a raw record to snake_case.
///
/// When two keys collapse onto the same name, the one that sorts last wins.
pub fn normalize_keys(record: RawRecord) -> RawRecord {
    record
        .into_iter()
        .map(|(key, value)| (to_snake_case(&key), value))
        .collect()
}

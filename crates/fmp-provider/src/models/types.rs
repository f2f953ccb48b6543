use std::collections::BTreeMap;

use serde_json::{Map, Value};

/// Raw parameter mapping handed over by the host (CLI flags, HTTP query, ...)
pub type Params = Map<String, Value>;

/// Untyped API response item, keys in whatever casing FMP used
pub type RawRecord = Map<String, Value>;

/// Named secrets injected by the host
pub type Credentials = BTreeMap<String, String>;

/// Credential name under which the host passes an FMP API key
pub const API_KEY_CREDENTIAL: &str = "fmp_api_key";

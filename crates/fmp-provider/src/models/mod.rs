//! FMP data models
//!
//! - `types` - Aliases for raw parameters, raw records and credentials
//! - `query` - Validated query parameters (HistoricalRatingQueryParams)
//! - `field_map` - Static field tables (FieldSpec) and typed raw access (FieldReader)
//! - `historical_rating` - Output record for the rating endpoints (HistoricalRatingData)

pub mod field_map;
mod historical_rating;
mod query;
mod types;

pub use field_map::{FieldReader, FieldSpec};
pub use historical_rating::{fields as historical_rating_fields, HistoricalRatingData};
pub use query::HistoricalRatingQueryParams;
pub use types::{Credentials, Params, RawRecord, API_KEY_CREDENTIAL};

//! FMP fetcher implementations.
//!
//! Each fetcher covers one FMP endpoint and implements
//! [`Fetcher`](crate::fetcher::Fetcher). Endpoints of the form
//! `/api/v3/{path}/{symbol}` are built on
//! [`SymbolEndpoint`](crate::fetcher::SymbolEndpoint).

mod historical_rating;
mod rating;

pub use historical_rating::HistoricalRatingFetcher;
pub use rating::RatingFetcher;

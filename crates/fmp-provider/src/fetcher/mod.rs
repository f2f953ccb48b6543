//! Fetcher contract and the shared per-symbol extraction pipeline.
//!
//! A fetcher turns host parameters into output records in three steps:
//!
//! ```text
//! Params --transform_query--> Query --extract_data--> RawBatch --transform_data--> Vec<Data>
//! ```
//!
//! [`Fetcher::fetch_data`] runs all three. [`DynFetcher`] erases the
//! associated types so the registry can hold fetchers for different endpoints
//! side by side.

mod diagnostics;
mod endpoint;

pub use diagnostics::{FetchDiagnostics, SymbolAttempt};
pub use endpoint::{SymbolEndpoint, API_VERSION};

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::errors::FmpError;
use crate::models::{Credentials, Params, RawRecord};

/// Normalized raw records plus what each symbol returned.
#[derive(Clone, Debug, Default)]
pub struct RawBatch {
    pub records: Vec<RawRecord>,
    pub diagnostics: FetchDiagnostics,
}

/// Final result of a fetch: typed records and per-symbol diagnostics.
#[derive(Clone, Debug, Serialize)]
pub struct FetchOutput<T> {
    pub results: Vec<T>,
    pub diagnostics: FetchDiagnostics,
}

/// One logical data endpoint.
///
/// The host calls the three steps in order; none of them keep state between
/// calls.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Validated query parameters.
    type Query: Send + Sync;

    /// Output record type.
    type Data: Send;

    /// Validate raw host parameters.
    ///
    /// Fails with [`FmpError::Validation`] before any network call is made.
    fn transform_query(&self, params: &Params) -> Result<Self::Query, FmpError>;

    /// Fetch raw records for the query.
    ///
    /// Records come back with snake_case keys. Fails with
    /// [`FmpError::EmptyData`] when nothing was returned at all.
    async fn extract_data(
        &self,
        query: &Self::Query,
        credentials: Option<&Credentials>,
    ) -> Result<RawBatch, FmpError>;

    /// Map normalized raw records onto the output schema, one record each.
    fn transform_data(
        &self,
        query: &Self::Query,
        data: Vec<RawRecord>,
    ) -> Result<Vec<Self::Data>, FmpError>;

    /// Run validate, extract and transform in sequence.
    async fn fetch_data(
        &self,
        params: &Params,
        credentials: Option<&Credentials>,
    ) -> Result<FetchOutput<Self::Data>, FmpError> {
        let query = self.transform_query(params)?;
        let RawBatch {
            records,
            diagnostics,
        } = self.extract_data(&query, credentials).await?;
        let results = self.transform_data(&query, records)?;

        Ok(FetchOutput {
            results,
            diagnostics,
        })
    }
}

/// Type-erased fetcher producing JSON records, as stored in the registry.
#[async_trait]
pub trait DynFetcher: Send + Sync {
    async fn fetch_json(
        &self,
        params: &Params,
        credentials: Option<&Credentials>,
    ) -> Result<FetchOutput<Value>, FmpError>;
}

#[async_trait]
impl<F> DynFetcher for F
where
    F: Fetcher,
    F::Data: Serialize,
{
    async fn fetch_json(
        &self,
        params: &Params,
        credentials: Option<&Credentials>,
    ) -> Result<FetchOutput<Value>, FmpError> {
        let output = self.fetch_data(params, credentials).await?;
        let results = output
            .results
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(FetchOutput {
            results,
            diagnostics: output.diagnostics,
        })
    }
}

//! Provider abstraction for chart data sources.
//!
//! [`DataProvider`] is the seam between the dashboard core and whatever
//! actually serves chart JSON. The production implementation is
//! [`yahoo::provider::YahooChartProvider`], which talks to the upstream chart
//! endpoint (optionally through a CORS relay). Tests plug in scripted
//! providers.
//!
//! One call is exactly one attempt: retries live in
//! [`SeriesFetcher`](crate::requests::fetcher::SeriesFetcher), not here.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use market_charts::models::{fetch_params::FetchParams, series::NormalizedSeries};
//! use market_charts::providers::{DataProvider, errors::ProviderError};
//!
//! struct EmptyProvider;
//!
//! #[async_trait]
//! impl DataProvider for EmptyProvider {
//!     async fn fetch_series(
//!         &self,
//!         params: &FetchParams,
//!     ) -> Result<NormalizedSeries, ProviderError> {
//!         Ok(NormalizedSeries::new(Vec::new(), None, None, params.symbol.clone()))
//!     }
//! }
//! ```

pub mod errors;
pub mod yahoo;

use async_trait::async_trait;

use crate::{
    models::{fetch_params::FetchParams, series::NormalizedSeries},
    providers::errors::ProviderError,
};

/// A source of chart data for one symbol at a time.
///
/// Object safe, so the orchestrator can hold an `Arc<dyn DataProvider>` chosen
/// at runtime.
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Performs a single request for `params` and normalizes the response.
    ///
    /// # Returns
    ///
    /// * `Ok(NormalizedSeries)` - possibly empty when the range has no trades.
    /// * `Err(ProviderError)` - transport, HTTP status or response-shape failure.
    async fn fetch_series(&self, params: &FetchParams) -> Result<NormalizedSeries, ProviderError>;
}

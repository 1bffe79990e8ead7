//! Fixed-delay retry wrapper around a [`DataProvider`].

use std::{sync::Arc, time::Duration};

use tokio::time::sleep;
use tracing::{debug, warn};

use crate::{
    models::{fetch_params::FetchParams, series::NormalizedSeries},
    providers::DataProvider,
    requests::FetchError,
};

pub const DEFAULT_MAX_RETRIES: u32 = 1;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(500);

/// How often and how patiently a failed request is repeated.
///
/// The delay is constant between attempts: no exponential growth, no jitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Extra attempts after the first one; `1` means up to two requests.
    pub max_retries: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            delay: DEFAULT_RETRY_DELAY,
        }
    }
}

/// Fetches and normalizes one symbol's series, retrying transient failures.
///
/// Each call is independent: there is no caching, rate limiting, or
/// de-duplication of concurrent requests for the same symbol.
#[derive(Clone)]
pub struct SeriesFetcher {
    provider: Arc<dyn DataProvider>,
    policy: RetryPolicy,
}

impl SeriesFetcher {
    pub fn new(provider: Arc<dyn DataProvider>, policy: RetryPolicy) -> Self {
        Self { provider, policy }
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Fetches with the configured retry budget.
    pub async fn fetch(&self, params: &FetchParams) -> Result<NormalizedSeries, FetchError> {
        self.fetch_with_retries(params, self.policy.max_retries).await
    }

    /// Fetches with an explicit retry budget, making up to `max_retries + 1`
    /// requests.
    ///
    /// Only transient errors are retried. Shape errors fail immediately.
    pub async fn fetch_with_retries(
        &self,
        params: &FetchParams,
        max_retries: u32,
    ) -> Result<NormalizedSeries, FetchError> {
        let max_attempts = max_retries.saturating_add(1);
        let mut attempt = 0;

        loop {
            attempt += 1;
            debug!(%params, attempt, max_attempts, "fetching series");

            match self.provider.fetch_series(params).await {
                Ok(series) => {
                    debug!(%params, points = series.len(), "series fetched");
                    return Ok(series);
                }
                Err(err) if err.is_transient() && attempt < max_attempts => {
                    warn!(%params, attempt, error = %err, "fetch failed, retrying");
                    sleep(self.policy.delay).await;
                }
                Err(source) => {
                    warn!(%params, attempt, error = %source, "fetch failed");
                    return Err(FetchError {
                        symbol: params.symbol.clone(),
                        attempts: attempt,
                        source,
                    });
                }
            }
        }
    }
}

use thiserror::Error;

use crate::providers::errors::ProviderError;

/// A fetch that ran out of attempts, or hit a failure retrying cannot fix.
///
/// Callers treat this as "no data available right now", never as fatal.
#[derive(Debug, Error)]
#[error("fetching {symbol} failed after {attempts} attempt(s): {source}")]
pub struct FetchError {
    pub symbol: String,
    pub attempts: u32,
    #[source]
    pub source: ProviderError,
}

impl FetchError {
    /// `true` when the last failure was network-class (transport or HTTP status).
    pub fn is_network(&self) -> bool {
        self.source.is_transient()
    }
}

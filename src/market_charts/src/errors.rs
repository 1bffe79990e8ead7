use thiserror::Error;

use crate::{
    config::ConfigError, models::symbol::SymbolError, providers::errors::ProviderInitError,
    requests::FetchError,
};

/// The unified error type for the `market_charts` crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The HTTP provider could not be set up.
    #[error("Provider error: {0}")]
    ProviderInit(#[from] ProviderInitError),

    /// A fetch failed for good (after any retries).
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The searched code is not a usable symbol.
    #[error("Invalid symbol: {0}")]
    Symbol(#[from] SymbolError),

    /// The upstream answered, but with zero usable points.
    #[error("No data available for {symbol}")]
    NoData { symbol: String },
}

use thiserror::Error;

/// Errors raised while building a provider.
#[derive(Debug, Error)]
pub enum ProviderInitError {
    /// failed to init reqwest client
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[from] reqwest::Error),

    /// A configured base or proxy URL does not parse.
    #[error("Invalid URL {url:?}: {message}")]
    InvalidUrl { url: String, message: String },
}

/// Errors that can occur within a single `DataProvider` request.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport failure (DNS, connect, timeout, body read).
    #[error("API request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The upstream or the relay answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The body was received but does not have the expected chart shape.
    #[error("Unexpected response shape: {0}")]
    Shape(String),

    /// The request URL could not be built for these params.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ProviderError {
    /// Whether repeating the same request could plausibly succeed.
    ///
    /// Only transport and HTTP status failures qualify. A malformed but
    /// successfully delivered body will be just as malformed next time.
    pub fn is_transient(&self) -> bool {
        matches!(self, ProviderError::Request(_) | ProviderError::Status { .. })
    }
}

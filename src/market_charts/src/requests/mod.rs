mod errors;
pub use errors::FetchError;

pub mod fetcher;
pub use fetcher::{RetryPolicy, SeriesFetcher};
